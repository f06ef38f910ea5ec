//! Verification-question generation as a tracked background job, plus the
//! pending-record poll that reads the stored questions back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::api::{ApiError, HrApi};
use crate::models::{CandidateId, VerificationQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "verify-{:04}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Completed(Vec<VerificationQuestion>),
    Failed(String),
}

#[derive(Debug, Clone)]
struct JobEntry {
    candidate_id: CandidateId,
    status: JobStatus,
}

/// Registry of generation jobs. Submitting never waits for the job; callers
/// look it up by [`JobId`] later.
pub struct VerificationJobs<A: ?Sized> {
    api: Arc<A>,
    sequence: AtomicU64,
    jobs: Arc<Mutex<HashMap<JobId, JobEntry>>>,
}

impl<A> VerificationJobs<A>
where
    A: HrApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            sequence: AtomicU64::new(1),
            jobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Spawns generation on the current tokio runtime. An object payload is
    /// tagged with `candidate_id` so the server can file the questions against
    /// the pending record.
    pub fn submit(&self, candidate_id: CandidateId, mut resume: Value) -> JobId {
        if let Value::Object(fields) = &mut resume {
            fields.insert(
                "candidate_id".to_string(),
                Value::String(candidate_id.0.clone()),
            );
        }

        let id = JobId(self.sequence.fetch_add(1, Ordering::Relaxed));
        self.jobs.lock().expect("job mutex poisoned").insert(
            id,
            JobEntry {
                candidate_id: candidate_id.clone(),
                status: JobStatus::Running,
            },
        );

        let api = Arc::clone(&self.api);
        let jobs = Arc::clone(&self.jobs);
        tokio::spawn(async move {
            let status = match api.generate_verification_questions(&resume).await {
                Ok(questions) => {
                    info!(%candidate_id, job = %id, count = questions.len(), "verification questions generated");
                    JobStatus::Completed(questions)
                }
                Err(err) => {
                    warn!(%candidate_id, job = %id, error = %err, "verification question generation failed");
                    JobStatus::Failed(err.to_string())
                }
            };
            if let Some(entry) = jobs.lock().expect("job mutex poisoned").get_mut(&id) {
                entry.status = status;
            }
        });

        id
    }

    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        guard.get(&id).map(|entry| entry.status.clone())
    }

    pub fn candidate(&self, id: JobId) -> Option<CandidateId> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        guard.get(&id).map(|entry| entry.candidate_id.clone())
    }

    /// Checks the job every `interval` until it leaves `Running` or the
    /// attempts run out. Returns the last observed status.
    pub async fn wait(&self, id: JobId, interval: Duration, attempts: u32) -> Option<JobStatus> {
        let mut status = self.status(id)?;
        for _ in 0..attempts {
            if status != JobStatus::Running {
                break;
            }
            tokio::time::sleep(interval).await;
            status = self.status(id)?;
        }
        Some(status)
    }
}

/// What the pending record currently says about a candidate's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionStatus {
    /// Record exists but carries no questions yet.
    Generating,
    Ready(Vec<VerificationQuestion>),
    /// No pending record with that id.
    Missing,
}

/// Reads the pending list once. Generation and this read are unordered, so an
/// empty list means "still generating", not "none".
pub async fn poll_questions<A>(api: &A, candidate_id: &CandidateId) -> Result<QuestionStatus, ApiError>
where
    A: HrApi + ?Sized,
{
    let candidates = api.list_pending().await?;
    let status = match candidates
        .into_iter()
        .find(|candidate| &candidate.candidate_id == candidate_id)
    {
        None => QuestionStatus::Missing,
        Some(candidate) if candidate.verification_questions.is_empty() => {
            QuestionStatus::Generating
        }
        Some(candidate) => QuestionStatus::Ready(candidate.verification_questions),
    };
    Ok(status)
}

/// Repeats [`poll_questions`] while the answer is `Generating`.
pub async fn wait_for_questions<A>(
    api: &A,
    candidate_id: &CandidateId,
    interval: Duration,
    attempts: u32,
) -> Result<QuestionStatus, ApiError>
where
    A: HrApi + ?Sized,
{
    let mut status = poll_questions(api, candidate_id).await?;
    for _ in 1..attempts.max(1) {
        if status != QuestionStatus::Generating {
            break;
        }
        tokio::time::sleep(interval).await;
        status = poll_questions(api, candidate_id).await?;
    }
    Ok(status)
}
