//! Runs endpoint: `/v1/workflows/{workflow_id}/runs/`.

use reqwest::Method;
use uuid::Uuid;

use crate::types::{ResultFormat, RunCreate, RunResponse, RunResultContent};
use crate::{Error, ExtractorClient, Result, TRACING_TARGET_RUNS};

/// Operations on the runs of one workflow.
#[derive(Debug, Clone, Copy)]
pub struct RunsEndpoint<'a> {
    client: &'a ExtractorClient,
    workflow_id: Uuid,
}

impl<'a> RunsEndpoint<'a> {
    pub(crate) fn new(client: &'a ExtractorClient, workflow_id: Uuid) -> Self {
        Self {
            client,
            workflow_id,
        }
    }

    /// The workflow these runs belong to.
    pub fn workflow_id(&self) -> Uuid {
        self.workflow_id
    }

    /// List all runs of the workflow.
    pub async fn list(&self) -> Result<Vec<RunResponse>> {
        self.client
            .dispatch(Method::GET, &self.collection_path())
            .json()
            .await
    }

    /// Start a run over the given files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] without sending a request if
    /// `run.file_ids` is empty.
    pub async fn create(&self, run: &RunCreate) -> Result<RunResponse> {
        if run.file_ids.is_empty() {
            return Err(Error::invalid_input("a run needs at least one file id"));
        }

        let created: RunResponse = self
            .client
            .dispatch(Method::POST, &self.collection_path())
            .json_body(run)?
            .json()
            .await?;

        tracing::info!(
            target: TRACING_TARGET_RUNS,
            workflow_id = %self.workflow_id,
            run_num = created.run_num,
            files = run.file_ids.len(),
            status = %created.status,
            "Run created"
        );

        Ok(created)
    }

    /// Get a run by its workflow-scoped number.
    pub async fn get(&self, run_num: u32) -> Result<RunResponse> {
        let run: RunResponse = self
            .client
            .dispatch(Method::GET, &self.run_path(run_num))
            .json()
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_RUNS,
            workflow_id = %self.workflow_id,
            run_num,
            status = %run.status,
            "Run fetched"
        );

        Ok(run)
    }

    /// Fetch the results of a run in the requested format.
    ///
    /// `format_option` is passed through to the service as the
    /// `format_option` query parameter when it is non-empty.
    pub async fn results(
        &self,
        run_num: u32,
        format: ResultFormat,
        format_option: Option<&str>,
    ) -> Result<RunResultContent> {
        super::results::fetch(
            self.client,
            &format!("{}/results", self.run_path(run_num)),
            format,
            format_option,
        )
        .await
    }

    fn collection_path(&self) -> String {
        format!("/v1/workflows/{}/runs/", self.workflow_id)
    }

    fn run_path(&self, run_num: u32) -> String {
        format!("/v1/workflows/{}/runs/{run_num}", self.workflow_id)
    }
}
