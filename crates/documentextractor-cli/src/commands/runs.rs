use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use documentextractor_client::ExtractorClient;
use documentextractor_client::types::{ResultFormat, RunCreate};
use uuid::Uuid;

use super::output::{print_json, write_results};

/// Run operations; every run belongs to one workflow.
#[derive(Debug, Clone, Subcommand)]
pub enum RunsCommand {
    /// List the runs of a workflow.
    List {
        /// Workflow identifier.
        workflow_id: Uuid,
    },

    /// Start a run over one or more uploaded files.
    Create {
        /// Workflow identifier.
        workflow_id: Uuid,

        /// Files to extract from.
        #[arg(required = true, num_args = 1..)]
        file_ids: Vec<Uuid>,
    },

    /// Show one run.
    Get {
        /// Workflow identifier.
        workflow_id: Uuid,

        /// Run number within the workflow.
        run_num: u32,
    },

    /// Fetch the results of a run.
    Results {
        /// Workflow identifier.
        workflow_id: Uuid,

        /// Run number within the workflow.
        run_num: u32,

        /// Result format: json, csv, or excel.
        #[arg(long, default_value = "json")]
        format: ResultFormat,

        /// Format-specific option passed through to the service.
        #[arg(long)]
        format_option: Option<String>,

        /// Write results to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl RunsCommand {
    pub async fn execute(self, client: &ExtractorClient) -> anyhow::Result<()> {
        match self {
            Self::List { workflow_id } => print_json(
                &client
                    .runs(workflow_id)
                    .list()
                    .await
                    .with_context(|| format!("failed to list runs of workflow {workflow_id}"))?,
            ),
            Self::Create {
                workflow_id,
                file_ids,
            } => print_json(
                &client
                    .runs(workflow_id)
                    .create(&RunCreate::new(file_ids))
                    .await
                    .with_context(|| format!("failed to start a run of workflow {workflow_id}"))?,
            ),
            Self::Get {
                workflow_id,
                run_num,
            } => print_json(
                &client
                    .runs(workflow_id)
                    .get(run_num)
                    .await
                    .with_context(|| format!("failed to get run {run_num} of {workflow_id}"))?,
            ),
            Self::Results {
                workflow_id,
                run_num,
                format,
                format_option,
                output,
            } => {
                let content = client
                    .runs(workflow_id)
                    .results(run_num, format, format_option.as_deref())
                    .await
                    .with_context(|| {
                        format!("failed to fetch results of run {run_num} of {workflow_id}")
                    })?;

                write_results(&content, output.as_deref()).await
            }
        }
    }
}
