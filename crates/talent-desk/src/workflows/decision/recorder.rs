use std::sync::Arc;

use tracing::{info, warn};

use crate::api::HrApi;
use crate::models::{CandidateDraft, CreatedEmployee, EmployeeDraft, PendingCandidate};
use crate::notice::Notice;
use crate::workflows::verification::{JobId, VerificationJobs};

use super::lifecycle::{CandidateCase, CaseSubject, LifecycleState};
use super::DecisionError;

/// Result of a recorded decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub state: LifecycleState,
    pub notice: Notice,
    /// Pending record created by an upload approval.
    pub pending: Option<PendingCandidate>,
    /// Employee record created by a pending approval.
    pub employee: Option<CreatedEmployee>,
    pub verification_job: Option<JobId>,
}

impl DecisionOutcome {
    fn new(state: LifecycleState, notice: Notice) -> Self {
        Self {
            state,
            notice,
            pending: None,
            employee: None,
            verification_job: None,
        }
    }
}

/// Applies approve/reject decisions against the API.
///
/// No retries and no idempotency keys. A case refuses a second decision once
/// it is terminal, but two cases built from the same record are independent.
pub struct DecisionRecorder<A: ?Sized> {
    api: Arc<A>,
    verification: VerificationJobs<A>,
}

impl<A> DecisionRecorder<A>
where
    A: HrApi + ?Sized + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        let verification = VerificationJobs::new(Arc::clone(&api));
        Self { api, verification }
    }

    pub fn verification_jobs(&self) -> &VerificationJobs<A> {
        &self.verification
    }

    pub async fn approve(
        &self,
        case: &mut CandidateCase,
    ) -> Result<DecisionOutcome, DecisionError> {
        match case.subject() {
            CaseSubject::Upload(_) => self.approve_upload(case).await,
            CaseSubject::Pending(_) => self.approve_pending(case).await,
        }
    }

    pub async fn reject(&self, case: &mut CandidateCase) -> Result<DecisionOutcome, DecisionError> {
        match case.subject() {
            CaseSubject::Upload(_) => self.reject_upload(case),
            CaseSubject::Pending(_) => self.reject_pending(case).await,
        }
    }

    /// Creates the pending record, then starts question generation without
    /// waiting for it.
    async fn approve_upload(
        &self,
        case: &mut CandidateCase,
    ) -> Result<DecisionOutcome, DecisionError> {
        case.ensure_can_become(LifecycleState::Approved)?;
        let CaseSubject::Upload(Some(evaluation)) = case.subject() else {
            return Err(DecisionError::InvalidTransition {
                from: LifecycleState::Unevaluated,
                to: LifecycleState::Approved,
            });
        };

        let draft = CandidateDraft::from_resume(evaluation);
        let pending = self.api.create_pending(&draft).await.map_err(|err| {
            warn!(name = %draft.name, error = %err, "pending candidate creation failed");
            DecisionError::Api(err)
        })?;

        let job = self
            .verification
            .submit(pending.candidate_id.clone(), draft.evaluation_data.clone());
        case.advance(LifecycleState::Approved)?;

        info!(candidate_id = %pending.candidate_id, job = %job, "resume approved into pending queue");

        let mut outcome = DecisionOutcome::new(
            LifecycleState::Approved,
            Notice::success(format!(
                "{} was added to the pending queue; verification questions are being generated",
                draft.name
            )),
        );
        outcome.pending = Some(pending);
        outcome.verification_job = Some(job);
        Ok(outcome)
    }

    /// Deletes the pending record, then creates the employee. A failure in the
    /// second step is reported as partially applied; nothing is rolled back.
    async fn approve_pending(
        &self,
        case: &mut CandidateCase,
    ) -> Result<DecisionOutcome, DecisionError> {
        case.ensure_can_become(LifecycleState::Approved)?;
        let CaseSubject::Pending(candidate) = case.subject() else {
            return Err(DecisionError::WrongSource {
                action: "approving from the queue",
                source_label: case.subject().label(),
            });
        };
        let candidate = candidate.clone();

        self.api
            .delete_pending(&candidate.candidate_id)
            .await
            .map_err(|err| {
                warn!(candidate_id = %candidate.candidate_id, error = %err, "pending record removal failed");
                DecisionError::Api(err)
            })?;

        let draft = EmployeeDraft::from_pending(&candidate);
        let created = self.api.create_employee(&draft).await.map_err(|source| {
            warn!(
                candidate_id = %candidate.candidate_id,
                error = %source,
                "employee creation failed after pending record was removed"
            );
            DecisionError::PartiallyApplied {
                completed: "removing the pending record",
                failed: "creating the employee record",
                source,
            }
        })?;
        case.advance(LifecycleState::Approved)?;

        info!(candidate_id = %candidate.candidate_id, employee_id = %created.id, "pending candidate approved");

        let mut outcome = DecisionOutcome::new(
            LifecycleState::Approved,
            Notice::success(format!(
                "{} was registered as employee {}",
                candidate.basic_info.name, created.id
            )),
        );
        outcome.employee = Some(created);
        Ok(outcome)
    }

    async fn reject_pending(
        &self,
        case: &mut CandidateCase,
    ) -> Result<DecisionOutcome, DecisionError> {
        case.ensure_can_become(LifecycleState::Rejected)?;
        let Some(candidate_id) = case.candidate_id().cloned() else {
            return Err(DecisionError::WrongSource {
                action: "rejecting from the queue",
                source_label: case.subject().label(),
            });
        };

        self.api.delete_pending(&candidate_id).await.map_err(|err| {
            warn!(%candidate_id, error = %err, "pending record removal failed");
            DecisionError::Api(err)
        })?;
        case.advance(LifecycleState::Rejected)?;

        info!(%candidate_id, "pending candidate rejected");
        Ok(DecisionOutcome::new(
            LifecycleState::Rejected,
            Notice::success(format!("{} was removed from the pending queue", case.name())),
        ))
    }

    /// Upload rejections never reach the server.
    fn reject_upload(&self, case: &mut CandidateCase) -> Result<DecisionOutcome, DecisionError> {
        case.ensure_can_become(LifecycleState::Rejected)?;
        case.discard();
        case.advance(LifecycleState::Rejected)?;

        info!("uploaded resume rejected and discarded");
        Ok(DecisionOutcome::new(
            LifecycleState::Rejected,
            Notice::info("The resume was rejected. No data was saved."),
        ))
    }
}
