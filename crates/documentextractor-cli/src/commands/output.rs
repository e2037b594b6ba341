//! Rendering of command results on stdout or into files.

use std::path::Path;

use anyhow::Context;
use documentextractor_client::types::RunResultContent;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::TRACING_TARGET_COMMAND;

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{text}");
    Ok(())
}

/// Writes run results to `output`, or to stdout when no path is given.
///
/// Structured results are pretty-printed; CSV and Excel are written verbatim.
pub(crate) async fn write_results(
    content: &RunResultContent,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = match content {
        RunResultContent::Structured(result) => {
            let mut text = serde_json::to_string_pretty(result)
                .context("failed to render JSON results")?;
            text.push('\n');
            text.into_bytes()
        }
        RunResultContent::Csv(text) => text.as_bytes().to_vec(),
        RunResultContent::Excel(bytes) => bytes.to_vec(),
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("failed to write results to '{}'", path.display()))?;

            tracing::info!(
                target: TRACING_TARGET_COMMAND,
                path = %path.display(),
                bytes = bytes.len(),
                format = content.format().file_extension(),
                "Results written"
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&bytes)
                .await
                .context("failed to write results to stdout")?;
            stdout.flush().await.context("failed to flush stdout")?;
        }
    }

    Ok(())
}
