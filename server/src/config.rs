//! Server configuration from the environment and command line.
//!
//! Values are read from `OFFICEDIT_*` environment variables (a `.env` file
//! is loaded first) and can be overridden by flags.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use officedit::{DownloadName, ServiceOptions};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default request body limit for uploads (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Default `tracing` filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "officedit=info,officedit_server=info,tower_http=info";

/// Upload, edit and download Word and PowerPoint documents over HTTP
#[derive(Debug, Clone, Parser)]
#[command(
    name = "officedit-server",
    version,
    about = "Serve the officedit document editor"
)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "OFFICEDIT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "OFFICEDIT_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Web root; uploads are staged under `<web-root>/uploads`
    #[arg(long, env = "OFFICEDIT_WEB_ROOT", default_value = "wwwroot")]
    pub web_root: PathBuf,

    /// Nested staging directories and sibling .txt files for presentation edits
    #[arg(
        long,
        env = "OFFICEDIT_LEGACY",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub legacy: bool,

    /// How the suggested download name is derived
    #[arg(
        long,
        env = "OFFICEDIT_DOWNLOAD_NAME",
        value_enum,
        default_value = "strip-prefix"
    )]
    pub download_name: DownloadNameMode,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "OFFICEDIT_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

/// Download name mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DownloadNameMode {
    /// Drop everything up to the first underscore
    StripPrefix,
    /// Use the stored name as is
    Verbatim,
}

impl From<DownloadNameMode> for DownloadName {
    fn from(mode: DownloadNameMode) -> Self {
        match mode {
            DownloadNameMode::StripPrefix => DownloadName::StripPrefix,
            DownloadNameMode::Verbatim => DownloadName::Verbatim,
        }
    }
}

impl Config {
    /// Load `.env`, then parse the environment and command line.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            bail!("max upload size must be greater than zero");
        }
        if self.web_root.as_os_str().is_empty() {
            bail!("web root must not be empty");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// Document service options selected by the flags.
    pub fn service_options(&self) -> ServiceOptions {
        let base = if self.legacy {
            ServiceOptions::legacy()
        } else {
            ServiceOptions::default()
        };
        base.with_download_name(self.download_name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officedit::{PresentationUpdate, StagingLayout};

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["officedit-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--web-root",
            "/srv/www",
            "--download-name",
            "verbatim",
            "--max-upload-bytes",
            "1024",
        ]);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.web_root, PathBuf::from("/srv/www"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(
            config.service_options().download_name,
            DownloadName::Verbatim
        );
    }

    #[test]
    fn test_legacy_flag_selects_legacy_options() {
        let options = parse(&["--legacy"]).service_options();
        assert_eq!(options.layout, StagingLayout::Nested);
        assert_eq!(options.presentation_update, PresentationUpdate::ShadowText);
        assert_eq!(options.download_name, DownloadName::StripPrefix);
    }

    #[test]
    fn test_validate() {
        let mut config = parse(&["--web-root", "www"]);
        assert!(config.validate().is_ok());

        config.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_host_is_an_error() {
        let config = parse(&["--host", "not a host"]);
        assert!(config.socket_addr().is_err());
    }
}
