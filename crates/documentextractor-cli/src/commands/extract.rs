//! End-to-end extraction: upload, create a workflow, run it, and report.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Args;
use documentextractor_client::types::{
    ResultFormat, RunCreate, RunResponse, RunStatus, WorkflowCreate,
};
use documentextractor_client::{ExtractorClient, FileUpload};
use uuid::Uuid;

use super::load_json;
use super::output::print_json;
use crate::TRACING_TARGET_COMMAND;

/// Arguments of the `extract` command.
#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Document to extract data from.
    pub file: PathBuf,

    /// Workflow JSON, inline or as `@path/to/workflow.json`.
    pub workflow: String,

    /// Seconds to wait between run status checks.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,

    /// Keep the uploaded file and the created workflow.
    #[arg(long)]
    pub keep: bool,
}

/// A server-side resource created by this command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Created {
    File(Uuid),
    Workflow(Uuid),
}

impl ExtractArgs {
    pub async fn execute(self, client: &ExtractorClient) -> anyhow::Result<()> {
        let mut created = Vec::new();
        let outcome = self.extract(client, &mut created).await;

        if self.keep {
            for resource in &created {
                tracing::info!(target: TRACING_TARGET_COMMAND, resource = ?resource, "Keeping resource");
            }
        } else {
            cleanup(client, &created).await;
        }

        outcome
    }

    async fn extract(
        &self,
        client: &ExtractorClient,
        created: &mut Vec<Created>,
    ) -> anyhow::Result<()> {
        let payload: WorkflowCreate = load_json(&self.workflow).await?;

        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            path = %self.file.display(),
            "Uploading file"
        );
        let file = client
            .files()
            .upload(FileUpload::from_path(&self.file))
            .await
            .with_context(|| format!("failed to upload '{}'", self.file.display()))?;
        created.push(Created::File(file.id));

        tracing::info!(target: TRACING_TARGET_COMMAND, name = %payload.name, "Creating workflow");
        let workflow = client
            .workflows()
            .create(&payload)
            .await
            .context("failed to create workflow")?;
        created.push(Created::Workflow(workflow.id));

        let runs = client.runs(workflow.id);
        let run = runs
            .create(&RunCreate::new([file.id]))
            .await
            .context("failed to start run")?;

        let run = self.wait_for_run(client, run).await?;
        if run.status.is_unknown() {
            bail!(
                "run {} of workflow {} reported unrecognized status '{}'",
                run.run_num,
                workflow.id,
                run.status
            );
        }
        if run.status != RunStatus::Completed {
            bail!(
                "run {} of workflow {} finished with status '{}'",
                run.run_num,
                workflow.id,
                run.status
            );
        }

        let result = runs
            .results(run.run_num, ResultFormat::Json, None)
            .await
            .context("failed to fetch JSON results")?
            .into_structured()
            .context("service returned no structured results")?;

        if result.has_errors() {
            tracing::warn!(
                target: TRACING_TARGET_COMMAND,
                errors = ?result.errors,
                "Run completed with errors"
            );
        }
        println!("Extracted {} item(s)", result.extracted_data.len());
        if let Some(first) = result.extracted_data.first() {
            print_json(&first.data)?;
        }

        let csv = runs
            .results(run.run_num, ResultFormat::Csv, None)
            .await
            .context("failed to fetch CSV results")?;
        if let Some(text) = csv.as_csv() {
            println!("Received {} characters of CSV data", text.chars().count());
        }

        let excel = runs
            .results(run.run_num, ResultFormat::Excel, None)
            .await
            .context("failed to fetch Excel results")?;
        if let Some(bytes) = excel.as_excel() {
            println!("Received {} bytes of Excel data", bytes.len());
        }

        Ok(())
    }

    /// Polls the run until it reaches a terminal or unrecognized status.
    async fn wait_for_run(
        &self,
        client: &ExtractorClient,
        mut run: RunResponse,
    ) -> anyhow::Result<RunResponse> {
        let interval = Duration::from_secs(self.poll_interval_secs);
        let runs = client.runs(run.workflow_id);

        while !run.status.is_terminal() && !run.status.is_unknown() {
            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                run_num = run.run_num,
                status = %run.status,
                "Waiting for run"
            );
            tokio::time::sleep(interval).await;

            let run_num = run.run_num;
            run = runs
                .get(run_num)
                .await
                .with_context(|| format!("failed to refresh run {run_num}"))?;
        }

        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            run_num = run.run_num,
            status = %run.status,
            "Run finished"
        );
        Ok(run)
    }
}

/// Deletes created resources in reverse order; failures are logged only.
async fn cleanup(client: &ExtractorClient, created: &[Created]) {
    for resource in created.iter().rev() {
        let result = match *resource {
            Created::Workflow(id) => client.workflows().delete(id).await,
            Created::File(id) => client.files().delete(id).await,
        };

        match result {
            Ok(()) => tracing::info!(
                target: TRACING_TARGET_COMMAND,
                resource = ?resource,
                "Deleted resource"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET_COMMAND,
                resource = ?resource,
                error = %error,
                "Failed to delete resource; manual cleanup may be required"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const WORKFLOW: &str = r#"{"name": "Invoices", "extraction_schema": {"name": "Invoice", "type": "Text"}}"#;

    struct Fixture {
        server: MockServer,
        client: ExtractorClient,
        file_id: Uuid,
        workflow_id: Uuid,
        _dir: tempfile::TempDir,
        args: ExtractArgs,
    }

    async fn fixture(keep: bool) -> Fixture {
        let server = MockServer::start().await;
        let client = ExtractorClient::from_api_key(server.uri(), "test-key").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("invoice.txt");
        std::fs::write(&file, "Invoice INV-001, total 99.50").unwrap();

        let file_id = Uuid::new_v4();
        let workflow_id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path("/v1/files/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": file_id,
                "filename": "invoice.txt",
                "mime_type": "text/plain"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("/v1/files/{file_id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(if keep { 0 } else { 1 })
            .mount(&server)
            .await;

        Fixture {
            server,
            client,
            file_id,
            workflow_id,
            _dir: dir,
            args: ExtractArgs {
                file,
                workflow: WORKFLOW.to_owned(),
                poll_interval_secs: 1,
                keep,
            },
        }
    }

    async fn mount_workflow_and_run(fixture: &Fixture, keep: bool) {
        let Fixture {
            server,
            file_id,
            workflow_id,
            ..
        } = fixture;

        Mock::given(method("POST"))
            .and(path("/v1/workflows/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": workflow_id,
                "name": "Invoices"
            })))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("/v1/workflows/{workflow_id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(if keep { 0 } else { 1 })
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/workflows/{workflow_id}/runs/")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "run_num": 1,
                "workflow_id": workflow_id,
                "file_ids": [file_id],
                "status": "completed"
            })))
            .expect(1)
            .mount(server)
            .await;

        let results = format!("/v1/workflows/{workflow_id}/runs/1/results");
        Mock::given(method("GET"))
            .and(path(results.as_str()))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extracted_data": [{"file_id": file_id, "data": {"invoice_number": "INV-001"}}],
                "errors": []
            })))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(results.as_str()))
            .and(header("Accept", "text/csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("invoice_number\nINV-001\n"))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(results.as_str()))
            .and(header("Accept", ResultFormat::Excel.media_type()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_extract_cleans_up_in_reverse_order() {
        let fixture = fixture(false).await;
        mount_workflow_and_run(&fixture, false).await;

        fixture.args.clone().execute(&fixture.client).await.unwrap();

        let requests = fixture.server.received_requests().await.unwrap();
        let deletes: Vec<_> = requests
            .iter()
            .filter(|request| request.method.as_str() == "DELETE")
            .map(|request| request.url.path().to_owned())
            .collect();

        assert_eq!(
            deletes,
            [
                format!("/v1/workflows/{}", fixture.workflow_id),
                format!("/v1/files/{}", fixture.file_id),
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_keep_skips_cleanup() {
        let fixture = fixture(true).await;
        mount_workflow_and_run(&fixture, true).await;

        fixture.args.clone().execute(&fixture.client).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_step_still_cleans_up_and_reports_primary_error() {
        let fixture = fixture(false).await;

        Mock::given(method("POST"))
            .and(path("/v1/workflows/"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"detail": "schema is empty"})),
            )
            .expect(1)
            .mount(&fixture.server)
            .await;

        let error = fixture
            .args
            .clone()
            .execute(&fixture.client)
            .await
            .unwrap_err();

        assert!(format!("{error:#}").contains("failed to create workflow"));
        assert!(format!("{error:#}").contains("schema is empty"));
    }

    #[tokio::test]
    async fn test_unrecognized_status_stops_waiting() {
        let fixture = fixture(false).await;
        let workflow_id = fixture.workflow_id;

        Mock::given(method("POST"))
            .and(path("/v1/workflows/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": workflow_id,
                "name": "Invoices"
            })))
            .expect(1)
            .mount(&fixture.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(format!("/v1/workflows/{workflow_id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&fixture.server)
            .await;

        Mock::given(method("POST"))
            .and(path(format!("/v1/workflows/{workflow_id}/runs/")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "run_num": 1,
                "workflow_id": workflow_id,
                "file_ids": [fixture.file_id],
                "status": "archived"
            })))
            .expect(1)
            .mount(&fixture.server)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&fixture.server)
            .await;

        let error = fixture
            .args
            .clone()
            .execute(&fixture.client)
            .await
            .unwrap_err();

        assert!(error.to_string().contains("unrecognized status 'archived'"));
    }
}
