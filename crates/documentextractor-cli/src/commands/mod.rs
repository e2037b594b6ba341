//! Subcommands and their execution against the API.

mod extract;
mod files;
mod output;
mod runs;
mod workflows;

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use documentextractor_client::ExtractorClient;
use serde::de::DeserializeOwned;

pub use self::extract::ExtractArgs;
pub use self::files::FilesCommand;
pub use self::runs::RunsCommand;
pub use self::workflows::WorkflowsCommand;

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload, list, inspect, and delete files.
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// Manage extraction workflows.
    Workflows {
        #[command(subcommand)]
        command: WorkflowsCommand,
    },

    /// Start runs and fetch their results.
    Runs {
        #[command(subcommand)]
        command: RunsCommand,
    },

    /// Upload a file, run a workflow over it, and print the results.
    Extract(ExtractArgs),
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Files { .. } => "files",
            Self::Workflows { .. } => "workflows",
            Self::Runs { .. } => "runs",
            Self::Extract(_) => "extract",
        }
    }

    /// Executes the command.
    pub async fn execute(self, client: &ExtractorClient) -> anyhow::Result<()> {
        match self {
            Self::Files { command } => command.execute(client).await,
            Self::Workflows { command } => command.execute(client).await,
            Self::Runs { command } => command.execute(client).await,
            Self::Extract(args) => args.execute(client).await,
        }
    }
}

/// Reads a JSON payload given inline or as `@path`.
pub(crate) async fn load_json<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    let (source, text) = match input.strip_prefix('@') {
        Some(path) => {
            let text = tokio::fs::read_to_string(Path::new(path))
                .await
                .with_context(|| format!("failed to read JSON payload from '{path}'"))?;
            (path, text)
        }
        None => ("argument", input.to_owned()),
    };

    serde_json::from_str(&text).with_context(|| format!("invalid JSON payload in {source}"))
}
