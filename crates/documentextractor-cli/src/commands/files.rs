use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use documentextractor_client::{ExtractorClient, FileUpload};
use uuid::Uuid;

use super::output::print_json;

/// File operations.
#[derive(Debug, Clone, Subcommand)]
pub enum FilesCommand {
    /// List all uploaded files.
    List,

    /// Upload a file from disk.
    Upload {
        /// Path of the file to upload.
        path: PathBuf,

        /// Name to store the file under; defaults to the file's name on disk.
        #[arg(long)]
        filename: Option<String>,
    },

    /// Show one file.
    Get {
        /// File identifier.
        id: Uuid,
    },

    /// Delete a file.
    Delete {
        /// File identifier.
        id: Uuid,
    },
}

impl FilesCommand {
    pub async fn execute(self, client: &ExtractorClient) -> anyhow::Result<()> {
        let files = client.files();

        match self {
            Self::List => print_json(&files.list().await.context("failed to list files")?),
            Self::Upload { path, filename } => {
                let mut upload = FileUpload::from_path(&path);
                if let Some(filename) = filename {
                    upload = upload.with_filename(filename);
                }

                let file = files
                    .upload(upload)
                    .await
                    .with_context(|| format!("failed to upload '{}'", path.display()))?;
                print_json(&file)
            }
            Self::Get { id } => print_json(
                &files
                    .get(id)
                    .await
                    .with_context(|| format!("failed to get file {id}"))?,
            ),
            Self::Delete { id } => {
                files
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete file {id}"))?;
                println!("Deleted file {id}");
                Ok(())
            }
        }
    }
}
