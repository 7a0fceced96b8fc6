use serde::Deserialize;

use crate::error::UpdateError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OWNER: &str = "upcheck";
pub const DEFAULT_REPO: &str = "upcheck";

/// Latest published release, as returned by the GitHub releases API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl ReleaseInfo {
    /// Decode a `releases/latest` response body.
    ///
    /// # Errors
    /// Returns [`UpdateError::Decode`] when the body is not JSON or lacks
    /// `tag_name`/`html_url`.
    pub fn from_slice(body: &[u8]) -> Result<Self, UpdateError> {
        serde_json::from_slice(body).map_err(UpdateError::Decode)
    }
}

/// Repository whose latest release is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
        }
    }
}

impl ReleaseSource {
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ReleaseInfo, ReleaseSource};
    use crate::error::UpdateError;

    #[test]
    fn default_source_targets_github_latest_release() {
        assert_eq!(
            ReleaseSource::default().latest_release_url(),
            "https://api.github.com/repos/upcheck/upcheck/releases/latest"
        );
    }

    #[test]
    fn custom_api_base_drops_trailing_slash() {
        let source = ReleaseSource::default().with_api_base("http://127.0.0.1:8080/");

        assert_eq!(
            source.latest_release_url(),
            "http://127.0.0.1:8080/repos/upcheck/upcheck/releases/latest"
        );
    }

    #[test]
    fn decodes_minimal_release_and_ignores_unknown_fields() {
        let body = json!({
            "tag_name": "v1.4.0",
            "html_url": "https://github.com/upcheck/upcheck/releases/tag/v1.4.0",
            "assets": [],
            "author": { "login": "someone" }
        })
        .to_string();

        let release = ReleaseInfo::from_slice(body.as_bytes()).expect("release should decode");

        assert_eq!(release.tag_name, "v1.4.0");
        assert_eq!(
            release.html_url,
            "https://github.com/upcheck/upcheck/releases/tag/v1.4.0"
        );
        assert!(release.published_at.is_none());
        assert!(!release.prerelease);
    }

    #[test]
    fn missing_tag_name_is_a_decode_error() {
        let body = json!({ "html_url": "https://example.com" }).to_string();

        assert!(matches!(
            ReleaseInfo::from_slice(body.as_bytes()),
            Err(UpdateError::Decode(_))
        ));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        assert!(matches!(
            ReleaseInfo::from_slice(b"<html>rate limited</html>"),
            Err(UpdateError::Decode(_))
        ));
    }
}
