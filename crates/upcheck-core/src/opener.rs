use crate::error::OpenUrlError;

/// Hands a URL to whatever the platform uses to open links.
pub trait UrlOpener: Send + Sync {
    /// # Errors
    /// Returns an error when no handler could be launched.
    fn open(&self, url: &str) -> Result<(), OpenUrlError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenUrlError> {
        open::that(url).map_err(|source| OpenUrlError {
            url: url.to_string(),
            source,
        })
    }
}
