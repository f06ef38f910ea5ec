//! Resume upload: validate, fetch a presigned URL, push the file, trigger
//! parsing.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{ApiError, HrApi};
use crate::models::ResumeEvaluation;

pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("only PDF files can be uploaded (got {content_type})")]
    NotPdf { content_type: String },
    #[error("file must be 10MB or smaller (got {size} bytes)")]
    TooLarge { size: u64 },
    #[error("could not issue an upload URL: {0}")]
    UploadUrl(#[source] ApiError),
    #[error("file upload failed: {0}")]
    Storage(#[source] ApiError),
    #[error("resume analysis failed: {0}")]
    Parse(#[source] ApiError),
}

/// A resume that passed the local checks.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    file_name: String,
    content_type: mime::Mime,
    bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let parsed = content_type
            .parse::<mime::Mime>()
            .ok()
            .filter(|parsed| parsed.type_() == mime::APPLICATION && parsed.subtype() == mime::PDF)
            .ok_or_else(|| UploadError::NotPdf {
                content_type: content_type.to_string(),
            })?;

        let size = bytes.len() as u64;
        if size > MAX_RESUME_BYTES {
            return Err(UploadError::TooLarge { size });
        }

        Ok(Self {
            file_name: file_name.into(),
            content_type: parsed,
            bytes,
        })
    }

    /// Content type implied by the file extension, for callers reading from
    /// disk.
    pub fn content_type_for(file_name: &str) -> &'static str {
        if file_name.to_ascii_lowercase().ends_with(".pdf") {
            "application/pdf"
        } else {
            "application/octet-stream"
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        self.content_type.essence_str()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Uploaded,
    Evaluated,
    Failed(String),
}

pub struct ResumePipeline<A: ?Sized> {
    api: Arc<A>,
    status: watch::Sender<UploadStatus>,
}

impl<A> ResumePipeline<A>
where
    A: HrApi + ?Sized,
{
    pub fn new(api: Arc<A>) -> Self {
        let (status, _) = watch::channel(UploadStatus::Idle);
        Self { api, status }
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    pub fn reset(&self) {
        self.status.send_replace(UploadStatus::Idle);
    }

    /// Runs the three calls in order and returns the server's evaluation.
    pub async fn submit(&self, file: ResumeFile) -> Result<ResumeEvaluation, UploadError> {
        self.status.send_replace(UploadStatus::Uploading);
        let outcome = self.run(file).await;
        match &outcome {
            Ok(evaluation) => {
                info!(file_key = %evaluation.file_key, name = %evaluation.name, "resume evaluated");
                self.status.send_replace(UploadStatus::Evaluated);
            }
            Err(err) => {
                warn!(error = %err, "resume upload failed");
                self.status.send_replace(UploadStatus::Failed(err.to_string()));
            }
        }
        outcome
    }

    async fn run(&self, file: ResumeFile) -> Result<ResumeEvaluation, UploadError> {
        let ResumeFile {
            file_name,
            content_type,
            bytes,
        } = file;

        let ticket = self
            .api
            .request_upload_url(&file_name, content_type.essence_str())
            .await
            .map_err(UploadError::UploadUrl)?;

        self.api
            .upload_object(&ticket, content_type.essence_str(), bytes)
            .await
            .map_err(UploadError::Storage)?;
        self.status.send_replace(UploadStatus::Uploaded);

        let mut evaluation = self
            .api
            .parse_resume(&ticket.file_key)
            .await
            .map_err(UploadError::Parse)?;
        if evaluation.file_key.is_empty() {
            evaluation.file_key = ticket.file_key;
        }
        Ok(evaluation)
    }
}
