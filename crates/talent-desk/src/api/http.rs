use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, HrApi, UploadTicket};
use crate::config::ApiConfig;
use crate::models::{
    Assignment, AssignmentRequest, CandidateDraft, CandidateId, CreatedEmployee, DashboardMetrics,
    Employee, EmployeeDraft, EmployeeId, EvaluationKind, EvaluationResult, PendingCandidate,
    Project, ProjectDraft, Recommendation, RecommendationRequest, ResumeEvaluation,
    VerificationQuestion,
};

/// reqwest-backed client for the HR API. Cheap to clone.
#[derive(Clone)]
pub struct HttpHrApi {
    client: Client,
    base_url: Url,
}

impl HttpHrApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Appends `route` to the base path. Each segment is percent-encoded, so
    /// ids containing `/` or `?` stay inside their segment.
    fn endpoint(&self, route: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                endpoint: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(route);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        route: &[&str],
        body: Option<&Value>,
    ) -> Result<(String, Response), ApiError> {
        let label = route_label(route);
        let url = self.endpoint(route)?;
        debug!(%method, %url, "calling hr api");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: label.clone(),
            source,
        })?;
        Ok((label, response))
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &[&str]) -> Result<T, ApiError> {
        let (label, response) = self.send(Method::GET, route, None).await?;
        read_json(&label, response).await
    }

    async fn post_json<B, T>(&self, route: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|err| ApiError::Decode {
            endpoint: route_label(route),
            message: format!("request body could not be encoded: {err}"),
        })?;
        let (label, response) = self.send(Method::POST, route, Some(&body)).await?;
        read_json(&label, response).await
    }

    async fn delete(&self, route: &[&str]) -> Result<(), ApiError> {
        let (label, response) = self.send(Method::DELETE, route, None).await?;
        ensure_success(&label, response).await?;
        Ok(())
    }
}

fn route_label(route: &[&str]) -> String {
    format!("/{}", route.join("/"))
}

async fn ensure_success(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    warn!(endpoint, status = status.as_u16(), %message, "hr api call failed");

    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let response = ensure_success(endpoint, response).await?;
    let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

/// Prefers `message`, then `error`, from a JSON error body; falls back to the
/// raw text.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(Value::String(text)) = map.get(key) {
                return Some(text.clone());
            }
        }
    }

    Some(trimmed.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EmployeeListing {
    Wrapped { employees: Vec<Employee> },
    Bare(Vec<Employee>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PendingListing {
    Wrapped { candidates: Vec<PendingCandidate> },
    Bare(Vec<PendingCandidate>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectListing {
    Wrapped { projects: Vec<Project> },
    Bare(Vec<Project>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectEnvelope {
    Wrapped { project: Project },
    Bare(Project),
}

#[derive(Deserialize)]
struct PendingEnvelope {
    candidate: PendingCandidate,
}

#[derive(Deserialize)]
struct AssignmentEnvelope {
    assignment: Assignment,
}

#[derive(Deserialize)]
struct RecommendationEnvelope {
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

#[derive(Deserialize)]
struct QuestionsEnvelope {
    #[serde(default)]
    questions: Vec<VerificationQuestion>,
}

#[async_trait]
impl HrApi for HttpHrApi {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(match self.get_json(&["employees"]).await? {
            EmployeeListing::Wrapped { employees } => employees,
            EmployeeListing::Bare(employees) => employees,
        })
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ApiError> {
        self.post_json(&["employees"], draft).await
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ApiError> {
        self.delete(&["employees", id.0.as_str()]).await
    }

    async fn list_pending(&self) -> Result<Vec<PendingCandidate>, ApiError> {
        Ok(match self.get_json(&["pending-candidates"]).await? {
            PendingListing::Wrapped { candidates } => candidates,
            PendingListing::Bare(candidates) => candidates,
        })
    }

    async fn create_pending(&self, draft: &CandidateDraft) -> Result<PendingCandidate, ApiError> {
        let envelope: PendingEnvelope = self.post_json(&["pending-candidates"], draft).await?;
        Ok(envelope.candidate)
    }

    async fn delete_pending(&self, id: &CandidateId) -> Result<(), ApiError> {
        self.delete(&["pending-candidates", id.0.as_str()]).await
    }

    async fn evaluate(
        &self,
        candidate_id: &str,
        kind: EvaluationKind,
    ) -> Result<EvaluationResult, ApiError> {
        self.post_json(&[kind.route()], &json!({ "user_id": candidate_id }))
            .await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(match self.get_json(&["projects"]).await? {
            ProjectListing::Wrapped { projects } => projects,
            ProjectListing::Bare(projects) => projects,
        })
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        Ok(match self.post_json(&["projects"], draft).await? {
            ProjectEnvelope::Wrapped { project } => project,
            ProjectEnvelope::Bare(project) => project,
        })
    }

    async fn assign_project(
        &self,
        project_id: &str,
        request: &AssignmentRequest,
    ) -> Result<Assignment, ApiError> {
        let envelope: AssignmentEnvelope = self
            .post_json(&["projects", project_id, "assign"], request)
            .await?;
        Ok(envelope.assignment)
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, ApiError> {
        let envelope: RecommendationEnvelope =
            self.post_json(&["recommendations"], request).await?;
        Ok(envelope.recommendations)
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.get_json(&["dashboard", "metrics"]).await
    }

    async fn request_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ApiError> {
        self.post_json(
            &["resume", "upload-url"],
            &json!({ "file_name": file_name, "content_type": content_type }),
        )
        .await
    }

    async fn upload_object(
        &self,
        ticket: &UploadTicket,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        // Presigned URLs are absolute and bypass the API base.
        let endpoint = "object storage upload";
        let url = Url::parse(&ticket.upload_url).map_err(|_| ApiError::InvalidUrl {
            endpoint: ticket.upload_url.clone(),
        })?;

        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        ensure_success(endpoint, response).await?;
        Ok(())
    }

    async fn parse_resume(&self, file_key: &str) -> Result<ResumeEvaluation, ApiError> {
        self.post_json(&["resume", "parse"], &json!({ "file_key": file_key }))
            .await
    }

    async fn generate_verification_questions(
        &self,
        resume: &Value,
    ) -> Result<Vec<VerificationQuestion>, ApiError> {
        let envelope: QuestionsEnvelope = self
            .post_json(
                &["resume", "verification-questions"],
                &json!({ "resume_data": resume }),
            )
            .await?;
        Ok(envelope.questions)
    }
}
