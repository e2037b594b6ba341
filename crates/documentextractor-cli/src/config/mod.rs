//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── client: ExtractorConfig   # API URL, API key, timeout, user agent
//! └── command: Command          # files | workflows | runs | extract
//! ```
//!
//! Client settings can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! documentextractor --api-key "..." files list
//!
//! # Or via environment variables
//! DOCUMENTEXTRACTOR_API_KEY="..." documentextractor workflows list
//! ```

use std::process;

use anyhow::Context;
use clap::Parser;
use documentextractor_client::ExtractorConfig;

use crate::commands::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "documentextractor")]
#[command(about = "Extract structured data from documents with DocumentExtractor")]
#[command(version)]
pub struct Cli {
    /// DocumentExtractor API connection settings.
    #[clap(flatten)]
    pub client: ExtractorConfig,

    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so clap's `env` fallbacks can see it.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.client
            .validate()
            .context("invalid client configuration")?;
        Ok(())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            root_url = %self.client.root_url,
            timeout = ?self.client.timeout,
            user_agent = %self.client.user_agent,
            command = self.command.name(),
            "Client configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
