use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::api::{ApiError, HrApi, UploadTicket};
use crate::models::{
    Assignment, AssignmentRequest, BasicInfo, CandidateDraft, CandidateId, CreatedEmployee,
    DashboardMetrics, Employee, EmployeeDraft, EmployeeId, EvaluationKind, EvaluationResult,
    PendingCandidate, Project, ProjectDraft, Recommendation, RecommendationRequest,
    ResumeEvaluation, Severity, Skill, VerificationQuestion,
};

/// In-memory stand-in for the HR API that records every call.
#[derive(Default)]
pub(super) struct MemoryApi {
    employees: Mutex<Vec<Employee>>,
    pending: Mutex<Vec<PendingCandidate>>,
    evaluations: Mutex<HashMap<String, EvaluationResult>>,
    questions: Mutex<Vec<VerificationQuestion>>,
    parsed: Mutex<Option<ResumeEvaluation>>,
    failures: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    evaluation_gate: Mutex<Option<Arc<Semaphore>>>,
    question_gate: Mutex<Option<Arc<Semaphore>>>,
    recommendations: Mutex<Vec<Recommendation>>,
    sequence: AtomicU64,
}

impl MemoryApi {
    pub(super) fn with_pending(candidates: Vec<PendingCandidate>) -> Self {
        let api = Self::default();
        *api.pending.lock().expect("pending mutex poisoned") = candidates;
        api
    }

    pub(super) fn set_evaluation(&self, candidate_id: &str, result: EvaluationResult) {
        self.evaluations
            .lock()
            .expect("evaluation mutex poisoned")
            .insert(candidate_id.to_string(), result);
    }

    pub(super) fn set_questions(&self, questions: Vec<VerificationQuestion>) {
        *self.questions.lock().expect("question mutex poisoned") = questions;
    }

    pub(super) fn set_parsed(&self, evaluation: ResumeEvaluation) {
        *self.parsed.lock().expect("parse mutex poisoned") = Some(evaluation);
    }

    /// Simulates the server storing generated questions on the pending record.
    pub(super) fn store_questions(&self, id: &CandidateId, questions: Vec<VerificationQuestion>) {
        let mut guard = self.pending.lock().expect("pending mutex poisoned");
        if let Some(candidate) = guard.iter_mut().find(|c| &c.candidate_id == id) {
            candidate.verification_questions = questions;
        }
    }

    pub(super) fn fail(&self, operation: &'static str) {
        self.failures
            .lock()
            .expect("failure mutex poisoned")
            .insert(operation);
    }

    pub(super) fn recover(&self, operation: &'static str) {
        self.failures
            .lock()
            .expect("failure mutex poisoned")
            .remove(operation);
    }

    /// Makes every evaluation wait for a permit on the returned semaphore.
    pub(super) fn gate_evaluations(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.evaluation_gate.lock().expect("gate mutex poisoned") = Some(Arc::clone(&gate));
        gate
    }

    /// Holds question generation until a permit is added.
    pub(super) fn gate_questions(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.question_gate.lock().expect("gate mutex poisoned") = Some(Arc::clone(&gate));
        gate
    }

    pub(super) fn set_recommendations(&self, recommendations: Vec<Recommendation>) {
        *self
            .recommendations
            .lock()
            .expect("recommendation mutex poisoned") = recommendations;
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call mutex poisoned").clone()
    }

    /// Current queue contents, without recording a call.
    pub(super) fn list_pending_now(&self) -> Vec<PendingCandidate> {
        self.pending.lock().expect("pending mutex poisoned").clone()
    }

    pub(super) fn employees(&self) -> Vec<Employee> {
        self.employees.lock().expect("employee mutex poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("call mutex poisoned").push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), ApiError> {
        if self
            .failures
            .lock()
            .expect("failure mutex poisoned")
            .contains(operation)
        {
            return Err(ApiError::Status {
                endpoint: operation.to_string(),
                status: 500,
                message: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}_{n:08X}")
    }
}

fn not_found(endpoint: &str, message: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 404,
        message: message.to_string(),
    }
}

#[async_trait]
impl HrApi for MemoryApi {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.record("list_employees".to_string());
        self.check("list_employees")?;
        Ok(self.employees())
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<CreatedEmployee, ApiError> {
        self.record(format!("create_employee:{}", draft.name));
        self.check("create_employee")?;
        let id = EmployeeId(self.next_id("U"));
        self.employees
            .lock()
            .expect("employee mutex poisoned")
            .push(Employee {
                user_id: id.clone(),
                basic_info: BasicInfo {
                    name: draft.name.clone(),
                    role: draft.role.clone(),
                    years_of_experience: draft.years_of_experience,
                    email: draft.email.clone(),
                },
                skills: draft.skills.clone(),
                evaluation_data: draft.evaluation_data.clone(),
                ..Employee::default()
            });
        Ok(CreatedEmployee {
            id,
            message: "직원이 성공적으로 등록되었습니다".to_string(),
        })
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), ApiError> {
        self.record(format!("delete_employee:{}", id.0));
        self.check("delete_employee")?;
        let mut guard = self.employees.lock().expect("employee mutex poisoned");
        let before = guard.len();
        guard.retain(|employee| &employee.user_id != id);
        if guard.len() == before {
            return Err(not_found("delete_employee", "직원을 찾을 수 없습니다"));
        }
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<PendingCandidate>, ApiError> {
        self.record("list_pending".to_string());
        self.check("list_pending")?;
        Ok(self.pending.lock().expect("pending mutex poisoned").clone())
    }

    async fn create_pending(&self, draft: &CandidateDraft) -> Result<PendingCandidate, ApiError> {
        self.record(format!("create_pending:{}", draft.name));
        self.check("create_pending")?;
        let candidate = PendingCandidate {
            candidate_id: CandidateId(self.next_id("C")),
            basic_info: BasicInfo {
                name: draft.name.clone(),
                role: draft.role.clone(),
                years_of_experience: draft.years_of_experience,
                email: draft.email.clone(),
            },
            skills: draft.skills.clone(),
            evaluation_data: serde_json::from_value(draft.evaluation_data.clone()).ok(),
            submitted_at: Some("2024-11-10T09:30:00".to_string()),
            ..PendingCandidate::default()
        };
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .push(candidate.clone());
        Ok(candidate)
    }

    async fn delete_pending(&self, id: &CandidateId) -> Result<(), ApiError> {
        self.record(format!("delete_pending:{}", id.0));
        self.check("delete_pending")?;
        let mut guard = self.pending.lock().expect("pending mutex poisoned");
        let before = guard.len();
        guard.retain(|candidate| &candidate.candidate_id != id);
        if guard.len() == before {
            return Err(not_found("delete_pending", "대기자를 찾을 수 없습니다"));
        }
        Ok(())
    }

    async fn evaluate(
        &self,
        candidate_id: &str,
        kind: EvaluationKind,
    ) -> Result<EvaluationResult, ApiError> {
        self.record(format!("evaluate:{}:{candidate_id}", kind.label()));
        let gate = self
            .evaluation_gate
            .lock()
            .expect("gate mutex poisoned")
            .clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate open").forget();
        }
        self.check("evaluate")?;
        self.evaluations
            .lock()
            .expect("evaluation mutex poisoned")
            .get(candidate_id)
            .cloned()
            .ok_or_else(|| not_found("evaluate", "직원을 찾을 수 없습니다"))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record("list_projects".to_string());
        Ok(Vec::new())
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        self.record(format!("create_project:{}", draft.project_name));
        Ok(Project {
            project_id: self.next_id("P"),
            project_name: draft.project_name.clone(),
            ..Project::default()
        })
    }

    async fn assign_project(
        &self,
        project_id: &str,
        request: &AssignmentRequest,
    ) -> Result<Assignment, ApiError> {
        self.record(format!("assign_project:{project_id}:{}", request.employee_id));
        Ok(Assignment {
            project_id: project_id.to_string(),
            employee_id: request.employee_id.clone(),
            role: request.role.clone(),
            ..Assignment::default()
        })
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.record(format!(
            "recommend:{}:{}:{}",
            request.project_id,
            request.team_size,
            request.priority.label()
        ));
        self.check("recommend")?;
        Ok(self
            .recommendations
            .lock()
            .expect("recommendation mutex poisoned")
            .clone())
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.record("dashboard_metrics".to_string());
        Ok(DashboardMetrics::default())
    }

    async fn request_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ApiError> {
        self.record(format!("upload_url:{file_name}:{content_type}"));
        self.check("upload_url")?;
        Ok(UploadTicket {
            upload_url: format!("https://storage.test/resumes/{file_name}?signature=abc"),
            file_key: format!("resumes/{file_name}"),
        })
    }

    async fn upload_object(
        &self,
        ticket: &UploadTicket,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        self.record(format!("upload:{}:{content_type}:{}", ticket.file_key, bytes.len()));
        self.check("upload")
    }

    async fn parse_resume(&self, file_key: &str) -> Result<ResumeEvaluation, ApiError> {
        self.record(format!("parse:{file_key}"));
        self.check("parse")?;
        Ok(self
            .parsed
            .lock()
            .expect("parse mutex poisoned")
            .clone()
            .unwrap_or_default())
    }

    async fn generate_verification_questions(
        &self,
        resume: &Value,
    ) -> Result<Vec<VerificationQuestion>, ApiError> {
        let name = resume.get("name").and_then(Value::as_str).unwrap_or_default();
        let candidate_id = resume
            .get("candidate_id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        self.record(format!("questions:{name}:{candidate_id}"));
        let gate = self
            .question_gate
            .lock()
            .expect("gate mutex poisoned")
            .clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate open").forget();
        }
        self.check("questions")?;
        let questions = self.questions.lock().expect("question mutex poisoned").clone();
        // Files the questions on the pending record, as a server keyed by
        // candidate id would.
        self.store_questions(&CandidateId(candidate_id.to_string()), questions.clone());
        Ok(questions)
    }
}

pub(super) fn skill(name: &str, level: &str, years: f64) -> Skill {
    Skill {
        name: name.to_string(),
        level: level.to_string(),
        years,
    }
}

pub(super) fn evaluation(score: f64) -> EvaluationResult {
    serde_json::from_value(json!({
        "overall_score": score,
        "category_scores": {"기술 역량": 90.0, "프로젝트 경험": 85.0},
        "strengths": ["금융 도메인 경험 풍부"],
        "weaknesses": ["장기 프로젝트 경험 부족"],
        "analysis": "금융 프로젝트에 즉시 투입 가능",
        "project_experience_scores": {"scale_score": 0.7}
    }))
    .expect("evaluation fixture decodes")
}

pub(super) fn pending(id: &str, name: &str, evaluated: bool) -> PendingCandidate {
    PendingCandidate {
        candidate_id: CandidateId(id.to_string()),
        basic_info: BasicInfo {
            name: name.to_string(),
            role: "Backend Developer".to_string(),
            years_of_experience: 7.0,
            email: format!("{}@example.com", id.to_ascii_lowercase()),
        },
        skills: vec![skill("Python", "Advanced", 5.0), skill("FastAPI", "Intermediate", 2.0)],
        evaluation_data: evaluated.then(|| evaluation(82.0)),
        submitted_at: Some("2024-11-09T08:00:00".to_string()),
        ..PendingCandidate::default()
    }
}

pub(super) fn resume_evaluation(name: &str) -> ResumeEvaluation {
    ResumeEvaluation {
        employee_id: String::new(),
        name: name.to_string(),
        email: "hong@example.com".to_string(),
        role: "Senior Developer".to_string(),
        years_of_experience: 8.0,
        department: "개발팀".to_string(),
        skills: vec![skill("React", "Expert", 6.0), skill("Node.js", "Advanced", 5.0)],
        quantitative_score: 85.0,
        qualitative_analysis: "요구 기술 스택 대부분 보유".to_string(),
        domain_expertise: [("Finance".to_string(), 0.9)].into_iter().collect(),
        file_key: String::new(),
        extra: Default::default(),
    }
}

pub(super) fn question(text: &str, severity: Severity) -> VerificationQuestion {
    VerificationQuestion {
        category: "기술적 깊이 검증".to_string(),
        question: text.to_string(),
        reason: "세부 서술 부족".to_string(),
        severity,
    }
}
