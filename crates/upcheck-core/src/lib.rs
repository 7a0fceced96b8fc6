//! Release checking for desktop applications.
//!
//! This crate holds everything that does not need a window:
//! - Version key computation and comparison.
//! - The GitHub latest-release model and endpoint derivation.
//! - Collaborator traits for HTTP, dialogs, link opening, translation and
//!   logging, with production implementations where they are toolkit-free.
//! - The update check orchestrator tying them together.

pub mod checker;
pub mod dialog;
mod error;
mod event_log;
mod http;
mod i18n;
mod opener;
mod release;
pub mod version;

/// Update check orchestrator and its outcome/state types.
pub use checker::{CheckOutcome, CheckState, DEFAULT_APP_NAME, PendingCheck, UpdateChecker};
/// Modal dialog seam.
pub use dialog::{DialogButtons, DialogChoice, DialogKind, DialogRequest, Dialogs};
/// Error taxonomy for transport, decode, version and open-link failures.
pub use error::{OpenUrlError, TransportError, UpdateError, VersionOrigin};
/// Injected logging capability.
pub use event_log::EventLog;
/// HTTP seam and the reqwest-backed client.
pub use http::{HttpClient, ReqwestClient};
/// User-facing text lookup.
pub use i18n::{Catalog, CatalogError, Translator, Untranslated};
/// Link opening seam and the platform opener.
pub use opener::{SystemOpener, UrlOpener};
/// Release model and endpoint source.
pub use release::{DEFAULT_API_BASE, DEFAULT_OWNER, DEFAULT_REPO, ReleaseInfo, ReleaseSource};
/// Version key helpers.
pub use version::{
    VersionParseError, checked_version_to_number, strip_version_prefix, version_to_number,
};
