use crate::models::{CandidateId, EvaluationResult, PendingCandidate, ResumeEvaluation};

use super::DecisionError;

/// `Unevaluated → Evaluated → {Approved, Rejected}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unevaluated,
    Evaluated,
    Approved,
    Rejected,
}

impl LifecycleState {
    pub const fn label(self) -> &'static str {
        match self {
            LifecycleState::Unevaluated => "unevaluated",
            LifecycleState::Evaluated => "evaluated",
            LifecycleState::Approved => "approved",
            LifecycleState::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Approved | LifecycleState::Rejected)
    }

    /// Re-evaluation is allowed until a decision lands. Rejection does not
    /// require an evaluation; approval does.
    pub const fn can_become(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Unevaluated, Evaluated)
                | (Evaluated, Evaluated)
                | (Evaluated, Approved)
                | (Evaluated, Rejected)
                | (Unevaluated, Rejected)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseSubject {
    /// Freshly uploaded resume; exists only in memory until approved.
    Upload(Option<ResumeEvaluation>),
    /// Record in the server's pending queue.
    Pending(PendingCandidate),
}

impl CaseSubject {
    pub const fn label(&self) -> &'static str {
        match self {
            CaseSubject::Upload(_) => "resume upload",
            CaseSubject::Pending(_) => "pending queue",
        }
    }
}

/// One candidate under review and where it sits in the lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCase {
    subject: CaseSubject,
    state: LifecycleState,
}

impl CandidateCase {
    pub fn upload() -> Self {
        Self {
            subject: CaseSubject::Upload(None),
            state: LifecycleState::Unevaluated,
        }
    }

    pub fn from_resume(evaluation: ResumeEvaluation) -> Self {
        Self {
            subject: CaseSubject::Upload(Some(evaluation)),
            state: LifecycleState::Evaluated,
        }
    }

    /// Pending records carrying evaluation data start out evaluated.
    pub fn from_pending(candidate: PendingCandidate) -> Self {
        let state = if candidate.evaluation_data.is_some() {
            LifecycleState::Evaluated
        } else {
            LifecycleState::Unevaluated
        };
        Self {
            subject: CaseSubject::Pending(candidate),
            state,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn subject(&self) -> &CaseSubject {
        &self.subject
    }

    pub fn name(&self) -> &str {
        match &self.subject {
            CaseSubject::Upload(Some(evaluation)) => &evaluation.name,
            CaseSubject::Upload(None) => "",
            CaseSubject::Pending(candidate) => &candidate.basic_info.name,
        }
    }

    pub fn candidate_id(&self) -> Option<&CandidateId> {
        match &self.subject {
            CaseSubject::Pending(candidate) => Some(&candidate.candidate_id),
            CaseSubject::Upload(_) => None,
        }
    }

    pub fn ensure_can_become(&self, next: LifecycleState) -> Result<(), DecisionError> {
        if self.state.can_become(next) {
            Ok(())
        } else {
            Err(DecisionError::InvalidTransition {
                from: self.state,
                to: next,
            })
        }
    }

    pub(super) fn advance(&mut self, next: LifecycleState) -> Result<(), DecisionError> {
        self.ensure_can_become(next)?;
        self.state = next;
        Ok(())
    }

    /// Attaches a resume evaluation to an upload case.
    pub fn record_resume(&mut self, evaluation: ResumeEvaluation) -> Result<(), DecisionError> {
        self.ensure_can_become(LifecycleState::Evaluated)?;
        match &mut self.subject {
            CaseSubject::Upload(slot) => {
                *slot = Some(evaluation);
                self.state = LifecycleState::Evaluated;
                Ok(())
            }
            CaseSubject::Pending(_) => Err(DecisionError::WrongSource {
                action: "recording a resume evaluation",
                source_label: "pending queue",
            }),
        }
    }

    /// Attaches a fresh evaluation to a pending case, replacing any earlier one.
    pub fn record_evaluation(&mut self, result: EvaluationResult) -> Result<(), DecisionError> {
        self.ensure_can_become(LifecycleState::Evaluated)?;
        match &mut self.subject {
            CaseSubject::Pending(candidate) => {
                candidate.evaluation_data = Some(result);
                self.state = LifecycleState::Evaluated;
                Ok(())
            }
            CaseSubject::Upload(_) => Err(DecisionError::WrongSource {
                action: "recording an employee evaluation",
                source_label: "resume upload",
            }),
        }
    }

    /// Drops in-memory evaluation data; used when an upload is rejected.
    pub(super) fn discard(&mut self) {
        if let CaseSubject::Upload(slot) = &mut self.subject {
            *slot = None;
        }
    }
}
