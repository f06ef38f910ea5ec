//! Approve/reject decisions for candidates coming from a resume upload or the
//! pending queue.

mod lifecycle;
mod recorder;

pub use lifecycle::{CandidateCase, CaseSubject, LifecycleState};
pub use recorder::{DecisionOutcome, DecisionRecorder};

use crate::api::ApiError;
use crate::notice::Notice;

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("candidate cannot move from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
    #[error("{action} does not apply to a {source_label} candidate")]
    WrongSource {
        action: &'static str,
        source_label: &'static str,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{completed} succeeded but {failed} failed: {source}")]
    PartiallyApplied {
        completed: &'static str,
        failed: &'static str,
        #[source]
        source: ApiError,
    },
}

impl DecisionError {
    pub fn notice(&self) -> Notice {
        Notice::from_error(self)
    }
}
