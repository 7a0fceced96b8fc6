use std::path::PathBuf;

use clap::Parser;

use crate::settings::AppSettings;

#[derive(Debug, Parser)]
#[command(
    name = "upcheck",
    version,
    about = "Check for a newer release and offer to open its download page"
)]
pub struct Cli {
    /// Proxy address for the release request, overriding the settings file
    #[arg(long, value_name = "URL", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Connect directly even when a proxy is configured
    #[arg(long)]
    pub no_proxy: bool,

    /// Version to compare against instead of this build's version
    #[arg(long, value_name = "VERSION")]
    pub current_version: Option<String>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Settings file to read instead of the per-user default
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyMode {
    /// Leave the HTTP client's system proxy detection alone.
    System,
    Direct,
    Address(String),
}

impl Cli {
    #[must_use]
    pub fn proxy_mode(&self, settings: &AppSettings) -> ProxyMode {
        if self.no_proxy {
            return ProxyMode::Direct;
        }
        match self.proxy.as_ref().or(settings.proxy.as_ref()) {
            Some(address) => ProxyMode::Address(address.clone()),
            None => ProxyMode::System,
        }
    }

    #[must_use]
    pub fn debug_logging(&self, settings: &AppSettings) -> bool {
        self.debug || settings.debug_logging
    }
}
