//! Workflows endpoint: `/v1/workflows/`.

use reqwest::Method;
use uuid::Uuid;

use super::RunsEndpoint;
use crate::types::{WorkflowCreate, WorkflowResponse, WorkflowUpdate};
use crate::{ExtractorClient, Result, TRACING_TARGET_WORKFLOWS};

/// Operations on extraction workflows.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowsEndpoint<'a> {
    client: &'a ExtractorClient,
}

impl<'a> WorkflowsEndpoint<'a> {
    pub(crate) fn new(client: &'a ExtractorClient) -> Self {
        Self { client }
    }

    /// List all workflows.
    pub async fn list(&self) -> Result<Vec<WorkflowResponse>> {
        self.client
            .dispatch(Method::GET, "/v1/workflows/")
            .json()
            .await
    }

    /// Create a workflow.
    pub async fn create(&self, workflow: &WorkflowCreate) -> Result<WorkflowResponse> {
        let created: WorkflowResponse = self
            .client
            .dispatch(Method::POST, "/v1/workflows/")
            .json_body(workflow)?
            .json()
            .await?;

        tracing::info!(
            target: TRACING_TARGET_WORKFLOWS,
            workflow_id = %created.id,
            name = %created.name,
            schema_nodes = workflow.extraction_schema.node_count(),
            "Workflow created"
        );

        Ok(created)
    }

    /// Get a workflow by id.
    pub async fn get(&self, workflow_id: Uuid) -> Result<WorkflowResponse> {
        self.client
            .dispatch(Method::GET, &workflow_path(workflow_id))
            .json()
            .await
    }

    /// Replace a workflow entirely (PUT).
    pub async fn replace(
        &self,
        workflow_id: Uuid,
        workflow: &WorkflowCreate,
    ) -> Result<WorkflowResponse> {
        let replaced = self
            .client
            .dispatch(Method::PUT, &workflow_path(workflow_id))
            .json_body(workflow)?
            .json()
            .await?;

        tracing::info!(target: TRACING_TARGET_WORKFLOWS, workflow_id = %workflow_id, "Workflow replaced");
        Ok(replaced)
    }

    /// Update the fields set in `update` (PATCH).
    pub async fn update(
        &self,
        workflow_id: Uuid,
        update: &WorkflowUpdate,
    ) -> Result<WorkflowResponse> {
        if update.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET_WORKFLOWS,
                workflow_id = %workflow_id,
                "Sending workflow update without any field set"
            );
        }

        let updated = self
            .client
            .dispatch(Method::PATCH, &workflow_path(workflow_id))
            .json_body(update)?
            .json()
            .await?;

        tracing::info!(target: TRACING_TARGET_WORKFLOWS, workflow_id = %workflow_id, "Workflow updated");
        Ok(updated)
    }

    /// Delete a workflow.
    pub async fn delete(&self, workflow_id: Uuid) -> Result<()> {
        self.client
            .dispatch(Method::DELETE, &workflow_path(workflow_id))
            .discard()
            .await?;

        tracing::info!(target: TRACING_TARGET_WORKFLOWS, workflow_id = %workflow_id, "Workflow deleted");
        Ok(())
    }

    /// Runs of the given workflow.
    pub fn runs(&self, workflow_id: Uuid) -> RunsEndpoint<'a> {
        RunsEndpoint::new(self.client, workflow_id)
    }
}

fn workflow_path(workflow_id: Uuid) -> String {
    format!("/v1/workflows/{workflow_id}")
}
