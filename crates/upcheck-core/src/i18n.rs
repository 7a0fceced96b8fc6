use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Looks up user-facing text by its literal English source string.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Returns every string as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translator for Untranslated {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read translation catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse translation catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Translation table loaded from a flat JSON object of
/// `"English source": "translated text"` pairs. Missing keys fall back to the
/// source string.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    #[must_use]
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load a catalog file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not a JSON object of
    /// strings.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let entries = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Catalog, CatalogError, Translator, Untranslated};

    #[test]
    fn untranslated_returns_source_text() {
        assert_eq!(Untranslated.translate("Check for Updates"), "Check for Updates");
    }

    #[test]
    fn catalog_falls_back_to_source_for_missing_keys() {
        let catalog = Catalog::from_entries(HashMap::from([(
            "Check for Updates".to_string(),
            "Nach Updates suchen".to_string(),
        )]));

        assert_eq!(catalog.translate("Check for Updates"), "Nach Updates suchen");
        assert_eq!(catalog.translate("Unknown"), "Unknown");
    }

    #[test]
    fn catalog_loads_from_json_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("fr.json");
        std::fs::write(
            &path,
            r#"{ "You are using the latest version.": "Vous utilisez la dernière version." }"#,
        )
        .expect("write catalog");

        let catalog = Catalog::load(&path).expect("catalog should load");

        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.translate("You are using the latest version."),
            "Vous utilisez la dernière version."
        );
    }

    #[test]
    fn catalog_rejects_non_string_values() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, r#"{ "Yes": 1 }"#).expect("write catalog");

        assert!(matches!(Catalog::load(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn catalog_reports_missing_file() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");

        assert!(matches!(
            Catalog::load(&temp_dir.path().join("missing.json")),
            Err(CatalogError::Read { .. })
        ));
    }
}
