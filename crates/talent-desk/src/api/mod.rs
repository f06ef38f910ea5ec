//! Single typed entry point for every call to the HR API.
//!
//! Workflows depend on the [`HrApi`] trait so they can run against the real
//! [`HttpHrApi`] or an in-memory fake.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{
    Assignment, AssignmentRequest, CandidateDraft, CandidateId, CreatedEmployee, DashboardMetrics,
    Employee, EmployeeDraft, EmployeeId, EvaluationKind, EvaluationResult, PendingCandidate,
    Project, ProjectDraft, Recommendation, RecommendationRequest, ResumeEvaluation,
    VerificationQuestion,
};

pub use http::HttpHrApi;

/// Presigned upload target issued by `POST /resume/upload-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    pub upload_url: String,
    pub file_key: String,
}

#[async_trait]
pub trait HrApi: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;
    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ApiError>;
    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ApiError>;

    async fn list_pending(&self) -> Result<Vec<PendingCandidate>, ApiError>;
    async fn create_pending(&self, draft: &CandidateDraft) -> Result<PendingCandidate, ApiError>;
    async fn delete_pending(&self, id: &CandidateId) -> Result<(), ApiError>;

    async fn evaluate(
        &self,
        candidate_id: &str,
        kind: EvaluationKind,
    ) -> Result<EvaluationResult, ApiError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError>;
    async fn assign_project(
        &self,
        project_id: &str,
        request: &AssignmentRequest,
    ) -> Result<Assignment, ApiError>;

    /// Ranked staffing candidates for a project, with the server's reasoning.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, ApiError>;

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError>;

    async fn request_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ApiError>;
    async fn upload_object(
        &self,
        ticket: &UploadTicket,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError>;
    async fn parse_resume(&self, file_key: &str) -> Result<ResumeEvaluation, ApiError>;

    async fn generate_verification_questions(
        &self,
        resume: &serde_json::Value,
    ) -> Result<Vec<VerificationQuestion>, ApiError>;
}

/// Failure of one API call. The display form is the message shown to the
/// operator; no variant is treated as retryable.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("{endpoint} is not a valid url")]
    InvalidUrl { endpoint: String },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
