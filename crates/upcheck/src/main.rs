mod cli;
mod dialogs;
mod logging;
mod paths;
mod settings;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, warn};
use upcheck_core::{
    Catalog, CheckOutcome, ReleaseSource, ReqwestClient, Translator, Untranslated, UpdateChecker,
};

use crate::cli::{Cli, ProxyMode};
use crate::dialogs::NativeDialogs;
use crate::paths::AppPaths;
use crate::settings::{AppSettings, SettingsError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let paths = AppPaths::new().ok();

    let settings_path = cli
        .settings
        .clone()
        .or_else(|| paths.as_ref().map(AppPaths::settings_file));
    let (settings, settings_error) = load_settings(settings_path.as_deref());

    let log_path = paths
        .as_ref()
        .filter(|paths| paths.ensure_dirs().is_ok())
        .map(AppPaths::log_file);
    logging::init_logging(
        log_path.as_deref(),
        cli.debug_logging(&settings),
        settings.max_log_size_bytes,
    );
    if let Some(e) = settings_error {
        warn!("{e}; using default settings");
    }

    let client = match ReqwestClient::new(
        Duration::from_secs(settings.http_timeout_secs),
        format!("upcheck/{}", env!("CARGO_PKG_VERSION")),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let local_version = cli
        .current_version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let mut source = ReleaseSource::default();
    if let Some(api_base) = &settings.release_api_base {
        source = source.with_api_base(api_base.clone());
    }

    let checker = UpdateChecker::new(Arc::new(client), Arc::new(NativeDialogs), local_version)
        .with_translator(load_translator(&settings))
        .with_source(source);

    match cli.proxy_mode(&settings) {
        ProxyMode::System => {}
        ProxyMode::Direct => {
            checker.configure_http_proxy(None);
        }
        ProxyMode::Address(address) => {
            checker.configure_http_proxy(Some(&address));
        }
    }

    match checker.run_check().await {
        CheckOutcome::Failed(_) => ExitCode::FAILURE,
        CheckOutcome::UpdateAvailable { .. } | CheckOutcome::UpToDate => ExitCode::SUCCESS,
    }
}

/// Load settings without logging: the logger is configured from them, so a
/// failure is handed back to be reported once logging is up.
fn load_settings(path: Option<&Path>) -> (AppSettings, Option<SettingsError>) {
    match path.map(AppSettings::load_from) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (AppSettings::default(), Some(e)),
        None => (AppSettings::default(), None),
    }
}

fn load_translator(settings: &AppSettings) -> Arc<dyn Translator> {
    let Some(path) = &settings.translations_file else {
        return Arc::new(Untranslated);
    };
    match Catalog::load(path) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            warn!("{e}; showing untranslated text");
            Arc::new(Untranslated)
        }
    }
}
