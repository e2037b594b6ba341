//! Files endpoint: `/v1/files/`.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::types::FileResponse;
use crate::{Error, ExtractorClient, Result, TRACING_TARGET_FILES};

/// Multipart field name the service reads the upload from.
const UPLOAD_FIELD: &str = "file";

/// A file to upload, read from disk or supplied in memory.
///
/// In-memory content always needs an explicit filename; the filename drives
/// MIME type detection and is what the service stores.
///
/// # Examples
///
/// ```
/// use documentextractor_client::FileUpload;
///
/// let from_disk = FileUpload::from_path("invoices/march.pdf");
/// assert_eq!(from_disk.filename().unwrap(), "march.pdf");
/// assert_eq!(from_disk.mime_type(), "application/pdf");
///
/// let in_memory = FileUpload::from_bytes(b"hello".to_vec(), "notes.txt");
/// assert_eq!(in_memory.mime_type(), "text/plain");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileUpload {
    file_path: Option<PathBuf>,
    file_content: Option<Bytes>,
    filename: Option<String>,
}

impl FileUpload {
    /// Create an empty upload; set a path or content before sending it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the file at `path`, named after its final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new().with_path(path)
    }

    /// Upload in-memory `content` under `filename`.
    pub fn from_bytes(content: impl Into<Bytes>, filename: impl Into<String>) -> Self {
        Self::new().with_content(content).with_filename(filename)
    }

    /// Set the path to read the file from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Set in-memory content; takes precedence over the path.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.file_content = Some(content.into());
        self
    }

    /// Set the filename the service should store.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Checks the upload can be sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if content is set without a filename,
    /// or if neither a path nor content is set.
    pub fn validate(&self) -> Result<()> {
        if self.file_content.is_some() && self.filename.is_none() {
            return Err(Error::invalid_input(
                "filename must be provided if file content is specified",
            ));
        }

        if self.file_content.is_none() && self.file_path.is_none() {
            return Err(Error::invalid_input(
                "either a file path or file content must be provided",
            ));
        }

        Ok(())
    }

    /// The filename sent to the service.
    pub fn filename(&self) -> Result<String> {
        if let Some(filename) = &self.filename {
            return Ok(filename.clone());
        }

        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::invalid_input("cannot derive a filename for the upload"))
    }

    /// The MIME type inferred for the upload.
    ///
    /// Content read from disk is typed by its path; in-memory content by its
    /// filename. Unknown extensions fall back to `application/octet-stream`.
    pub fn mime_type(&self) -> String {
        let source = match (&self.file_content, &self.file_path, &self.filename) {
            (None, Some(path), _) => Some(path.as_path()),
            (_, _, Some(filename)) => Some(Path::new(filename.as_str())),
            _ => None,
        };

        source
            .map(mime_guess::from_path)
            .map(|guess| guess.first_or_octet_stream())
            .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM)
            .to_string()
    }

    /// Builds the multipart form, reading the file from disk if needed.
    async fn into_form(self) -> Result<Form> {
        self.validate()?;

        let filename = self.filename()?;
        let mime_type = self.mime_type();

        let content = match self.file_content {
            Some(content) => content,
            None => {
                // validate() guarantees a path when there is no content.
                let path = self.file_path.unwrap_or_default();
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    Error::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to read file '{}': {}", path.display(), e),
                    ))
                })?;
                Bytes::from(bytes)
            }
        };

        tracing::debug!(
            target: TRACING_TARGET_FILES,
            filename = %filename,
            mime_type = %mime_type,
            size = content.len(),
            "Prepared file upload"
        );

        let length = content.len() as u64;
        let part = Part::stream_with_length(content, length)
            .file_name(filename)
            .mime_str(&mime_type)
            .map_err(|e| Error::invalid_input(format!("Invalid MIME type '{mime_type}': {e}")))?;

        Ok(Form::new().part(UPLOAD_FIELD, part))
    }
}

/// Operations on uploaded files.
#[derive(Debug, Clone, Copy)]
pub struct FilesEndpoint<'a> {
    client: &'a ExtractorClient,
}

impl<'a> FilesEndpoint<'a> {
    pub(crate) fn new(client: &'a ExtractorClient) -> Self {
        Self { client }
    }

    /// List all files.
    pub async fn list(&self) -> Result<Vec<FileResponse>> {
        self.client
            .dispatch(Method::GET, "/v1/files/")
            .json()
            .await
    }

    /// Upload a file.
    ///
    /// The upload is validated before any request is sent.
    pub async fn upload(&self, upload: FileUpload) -> Result<FileResponse> {
        let form = upload.into_form().await?;

        let file: FileResponse = self
            .client
            .dispatch(Method::POST, "/v1/files/")
            .multipart(form)
            .json()
            .await?;

        tracing::info!(
            target: TRACING_TARGET_FILES,
            file_id = %file.id,
            filename = %file.filename,
            "File uploaded"
        );

        Ok(file)
    }

    /// Get a file by id.
    pub async fn get(&self, file_id: Uuid) -> Result<FileResponse> {
        self.client
            .dispatch(Method::GET, &format!("/v1/files/{file_id}"))
            .json()
            .await
    }

    /// Delete a file.
    ///
    /// Succeeds on any 2xx status; the service decides whether deleting an
    /// already deleted file is an error.
    pub async fn delete(&self, file_id: Uuid) -> Result<()> {
        self.client
            .dispatch(Method::DELETE, &format!("/v1/files/{file_id}"))
            .discard()
            .await?;

        tracing::info!(target: TRACING_TARGET_FILES, file_id = %file_id, "File deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_without_filename_is_rejected() {
        let upload = FileUpload::new().with_content(b"0123456789".to_vec());
        let err = upload.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(err.to_string().contains("filename"));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        assert!(FileUpload::new().validate().is_err());
    }

    #[test]
    fn test_filename_from_path() {
        let upload = FileUpload::from_path("/tmp/reports/q1.csv");
        assert_eq!(upload.filename().unwrap(), "q1.csv");
        assert_eq!(upload.mime_type(), "text/csv");
    }

    #[test]
    fn test_explicit_filename_overrides_path_name() {
        let upload = FileUpload::from_path("/tmp/upload.bin").with_filename("scan.pdf");
        assert_eq!(upload.filename().unwrap(), "scan.pdf");
        // Content comes from disk, so the path decides the type.
        assert_eq!(upload.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_mime_type_from_filename_for_content() {
        let upload = FileUpload::from_bytes(b"0123456789".to_vec(), "a.txt");
        assert!(upload.validate().is_ok());
        assert_eq!(upload.mime_type(), "text/plain");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let upload = FileUpload::from_bytes(b"data".to_vec(), "blob.unknownext");
        assert_eq!(upload.mime_type(), "application/octet-stream");

        let upload = FileUpload::from_bytes(b"data".to_vec(), "noextension");
        assert_eq!(upload.mime_type(), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let upload = FileUpload::from_path("/definitely/not/here/invoice.pdf");
        let err = upload.into_form().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
