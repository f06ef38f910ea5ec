//! Review workflows layered over the [`HrApi`](crate::api::HrApi) client.

pub mod decision;
pub mod evaluation;
pub mod resume;
pub mod roster;
pub mod source;
pub mod verification;

#[cfg(test)]
mod tests;

pub use decision::{
    CandidateCase, CaseSubject, DecisionError, DecisionOutcome, DecisionRecorder, LifecycleState,
};
pub use evaluation::{EvaluationRequestor, EvaluationView};
pub use resume::{ResumeFile, ResumePipeline, UploadError, UploadStatus, MAX_RESUME_BYTES};
pub use roster::{CandidateList, Searchable};
pub use source::{refresh_pending, refresh_registered, CandidateSource, SourceRoster};
pub use verification::{
    poll_questions, wait_for_questions, JobId, JobStatus, QuestionStatus, VerificationJobs,
};
