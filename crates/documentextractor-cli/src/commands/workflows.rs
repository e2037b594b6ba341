use anyhow::Context;
use clap::Subcommand;
use documentextractor_client::ExtractorClient;
use documentextractor_client::types::{WorkflowCreate, WorkflowUpdate};
use uuid::Uuid;

use super::load_json;
use super::output::print_json;

/// Workflow operations.
///
/// Payloads are JSON, given inline or as `@path/to/file.json`.
#[derive(Debug, Clone, Subcommand)]
pub enum WorkflowsCommand {
    /// List all workflows.
    List,

    /// Create a workflow.
    Create {
        /// Workflow JSON: name, optional description, and extraction_schema.
        workflow: String,
    },

    /// Show one workflow.
    Get {
        /// Workflow identifier.
        id: Uuid,
    },

    /// Replace a workflow entirely.
    Replace {
        /// Workflow identifier.
        id: Uuid,

        /// Complete workflow JSON.
        workflow: String,
    },

    /// Update only the fields present in the JSON.
    Update {
        /// Workflow identifier.
        id: Uuid,

        /// Partial workflow JSON.
        update: String,
    },

    /// Delete a workflow.
    Delete {
        /// Workflow identifier.
        id: Uuid,
    },
}

impl WorkflowsCommand {
    pub async fn execute(self, client: &ExtractorClient) -> anyhow::Result<()> {
        let workflows = client.workflows();

        match self {
            Self::List => print_json(
                &workflows
                    .list()
                    .await
                    .context("failed to list workflows")?,
            ),
            Self::Create { workflow } => {
                let payload: WorkflowCreate = load_json(&workflow).await?;
                print_json(
                    &workflows
                        .create(&payload)
                        .await
                        .context("failed to create workflow")?,
                )
            }
            Self::Get { id } => print_json(
                &workflows
                    .get(id)
                    .await
                    .with_context(|| format!("failed to get workflow {id}"))?,
            ),
            Self::Replace { id, workflow } => {
                let payload: WorkflowCreate = load_json(&workflow).await?;
                print_json(
                    &workflows
                        .replace(id, &payload)
                        .await
                        .with_context(|| format!("failed to replace workflow {id}"))?,
                )
            }
            Self::Update { id, update } => {
                let payload: WorkflowUpdate = load_json(&update).await?;
                print_json(
                    &workflows
                        .update(id, &payload)
                        .await
                        .with_context(|| format!("failed to update workflow {id}"))?,
                )
            }
            Self::Delete { id } => {
                workflows
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete workflow {id}"))?;
                println!("Deleted workflow {id}");
                Ok(())
            }
        }
    }
}
