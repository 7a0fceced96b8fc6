//! Update check orchestration.
//!
//! A check cycle is one [`UpdateChecker::check_for_updates`] call followed by
//! [`PendingCheck::finish`]. The request runs as a tokio task; the decision
//! and the single modal dialog of the cycle run on whichever thread awaits
//! `finish`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::task::JoinHandle;

use crate::dialog::{DialogButtons, DialogChoice, DialogKind, DialogRequest, Dialogs};
use crate::error::{TransportError, UpdateError, VersionOrigin};
use crate::event_log::EventLog;
use crate::http::HttpClient;
use crate::i18n::{Translator, Untranslated};
use crate::opener::{SystemOpener, UrlOpener};
use crate::release::{ReleaseInfo, ReleaseSource};
use crate::version::{checked_version_to_number, strip_version_prefix};

pub const DEFAULT_APP_NAME: &str = "upcheck";

const CHECK_FAILED: &str = "Failed to check for updates. Please try again later.";
const NEW_VERSION_AVAILABLE: &str = "New version available";
const GO_TO_DOWNLOAD_PAGE: &str = "Go to download page?";

#[derive(Debug)]
pub enum CheckOutcome {
    Failed(UpdateError),
    UpdateAvailable {
        remote_version: String,
        download_url: String,
    },
    UpToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Idle,
    AwaitingResponse,
}

pub struct UpdateChecker {
    client: Arc<dyn HttpClient>,
    dialogs: Arc<dyn Dialogs>,
    opener: Arc<dyn UrlOpener>,
    translator: Arc<dyn Translator>,
    events: EventLog,
    source: ReleaseSource,
    app_name: String,
    local_version: String,
    in_flight: Arc<AtomicUsize>,
}

impl UpdateChecker {
    pub fn new(
        client: Arc<dyn HttpClient>,
        dialogs: Arc<dyn Dialogs>,
        local_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            dialogs,
            opener: Arc::new(SystemOpener),
            translator: Arc::new(Untranslated),
            events: EventLog::global(),
            source: ReleaseSource::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
            local_version: local_version.into(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn with_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn with_event_log(mut self, events: EventLog) -> Self {
        self.events = events;
        self
    }

    /// Name used as the dialog title and in the up-to-date message.
    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: ReleaseSource) -> Self {
        self.source = source;
        self
    }

    /// Number of requests issued but not yet finished or dropped.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn state(&self) -> CheckState {
        if self.in_flight() == 0 {
            CheckState::Idle
        } else {
            CheckState::AwaitingResponse
        }
    }

    /// Route release requests through `proxy`, or go direct when `None`.
    ///
    /// Returns whether a proxy is in effect. An unusable address leaves the
    /// client connecting directly.
    pub fn configure_http_proxy(&self, proxy: Option<&str>) -> bool {
        match self.client.configure_proxy(proxy) {
            Ok(true) => {
                let address = proxy.map(redact_proxy).unwrap_or_default();
                self.events
                    .info(format_args!("Using HTTP proxy {address} for update checks"));
                true
            }
            Ok(false) => {
                self.events
                    .info(format_args!("Using a direct connection for update checks"));
                false
            }
            Err(error) => {
                self.events.warn(format_args!(
                    "Ignoring proxy configuration ({error}), connecting directly"
                ));
                if let Err(error) = self.client.configure_proxy(None) {
                    self.events
                        .error(format_args!("Failed to reset HTTP client: {error}"));
                }
                false
            }
        }
    }

    /// Issue the latest-release request and return without waiting for it.
    ///
    /// The request is spawned on the current tokio runtime. Called outside a
    /// runtime, nothing is sent and the check finishes as a
    /// [`TransportError::TaskFailed`] failure. Overlapping calls are not
    /// de-duplicated; each returns its own [`PendingCheck`].
    pub fn check_for_updates(&self) -> PendingCheck {
        let url = self.source.latest_release_url();
        let guard = InFlightGuard::enter(Arc::clone(&self.in_flight));
        self.events.info(format_args!(
            "Checking for updates (current version {}) at {url}",
            self.local_version
        ));

        let request = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let client = Arc::clone(&self.client);
                let request_url = url.clone();
                Request::Spawned(runtime.spawn(async move { client.get(&request_url).await }))
            }
            Err(error) => Request::NotStarted(TransportError::TaskFailed {
                details: error.to_string(),
            }),
        };

        PendingCheck {
            url,
            request,
            _guard: guard,
        }
    }

    /// Run a full check cycle: request, decide, present one dialog.
    pub async fn run_check(&self) -> CheckOutcome {
        self.check_for_updates().finish(self).await
    }

    /// Decide the outcome for a finished request and present its dialog.
    pub fn handle_finished_reply(&self, reply: Result<Vec<u8>, TransportError>) -> CheckOutcome {
        let outcome = match reply
            .map_err(UpdateError::from)
            .and_then(|body| self.compare_release(&body))
        {
            Ok(outcome) => outcome,
            Err(error) => CheckOutcome::Failed(error),
        };

        match &outcome {
            CheckOutcome::Failed(error) => {
                self.events.error(format_args!("Update check failed: {error}"));
                self.present(DialogKind::Error, CHECK_FAILED, DialogButtons::Ok);
            }
            CheckOutcome::UpdateAvailable {
                remote_version,
                download_url,
            } => self.offer_update(remote_version, download_url),
            CheckOutcome::UpToDate => {
                self.events.info(format_args!(
                    "Version {} is up to date",
                    self.local_version
                ));
                let message = format!("{} is already the latest version", self.app_name);
                self.present(DialogKind::Info, &message, DialogButtons::Ok);
            }
        }

        outcome
    }

    fn compare_release(&self, body: &[u8]) -> Result<CheckOutcome, UpdateError> {
        let release = ReleaseInfo::from_slice(body)?;
        let remote_version = strip_version_prefix(&release.tag_name);

        let remote = checked_version_to_number(remote_version).map_err(|source| {
            UpdateError::Version {
                which: VersionOrigin::Remote,
                source,
            }
        })?;
        let local = checked_version_to_number(strip_version_prefix(&self.local_version))
            .map_err(|source| UpdateError::Version {
                which: VersionOrigin::Local,
                source,
            })?;

        self.events.debug(format_args!(
            "Latest release {} ({}{}, published {}) has key {remote}, local key is {local}",
            release.tag_name,
            release.name.as_deref().unwrap_or("unnamed"),
            if release.prerelease { ", prerelease" } else { "" },
            release.published_at.as_deref().unwrap_or("at an unknown time"),
        ));

        if remote > local {
            Ok(CheckOutcome::UpdateAvailable {
                remote_version: remote_version.to_string(),
                download_url: release.html_url,
            })
        } else {
            Ok(CheckOutcome::UpToDate)
        }
    }

    fn offer_update(&self, remote_version: &str, download_url: &str) {
        self.events.info(format_args!(
            "Update available: {} -> {remote_version}",
            self.local_version
        ));

        let body = format!(
            "{}: {remote_version}\n{}",
            self.translator.translate(NEW_VERSION_AVAILABLE),
            self.translator.translate(GO_TO_DOWNLOAD_PAGE)
        );
        let choice = self.dialogs.present(&DialogRequest {
            kind: DialogKind::Info,
            title: self.translator.translate(&self.app_name),
            body,
            buttons: DialogButtons::YesNo,
        });
        if choice != DialogChoice::Yes {
            return;
        }

        match self.opener.open(download_url) {
            Ok(()) => self
                .events
                .info(format_args!("Opened download page {download_url}")),
            Err(error) => self.events.error(format_args!("{error}")),
        }
    }

    fn present(&self, kind: DialogKind, body: &str, buttons: DialogButtons) -> DialogChoice {
        self.dialogs.present(&DialogRequest {
            kind,
            title: self.translator.translate(&self.app_name),
            body: self.translator.translate(body),
            buttons,
        })
    }
}

/// An issued request whose outcome has not been handled yet.
///
/// Dropping it aborts the request.
pub struct PendingCheck {
    url: String,
    request: Request,
    _guard: InFlightGuard,
}

enum Request {
    Spawned(JoinHandle<Result<Vec<u8>, TransportError>>),
    NotStarted(TransportError),
}

impl PendingCheck {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the reply and let `checker` decide and present the outcome.
    pub async fn finish(mut self, checker: &UpdateChecker) -> CheckOutcome {
        let reply = match &mut self.request {
            Request::Spawned(task) => match task.await {
                Ok(reply) => reply,
                Err(error) => Err(TransportError::TaskFailed {
                    details: error.to_string(),
                }),
            },
            Request::NotStarted(error) => Err(error.clone()),
        };
        checker.handle_finished_reply(reply)
    }
}

impl Drop for PendingCheck {
    fn drop(&mut self) {
        if let Request::Spawned(task) = &self.request {
            task.abort();
        }
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn redact_proxy(address: &str) -> String {
    match address.rsplit_once('@') {
        Some((credentials, host)) => match credentials.split_once("://") {
            Some((scheme, _)) => format!("{scheme}://***@{host}"),
            None => format!("***@{host}"),
        },
        None => address.to_string(),
    }
}
