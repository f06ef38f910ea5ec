//! Display records mirrored from the HR API.
//!
//! Every record tolerates missing fields and keeps unknown ones in `extra`, so
//! payloads survive a fetch-and-resend without losing data.

pub mod dashboard;
pub mod evaluation;
mod numeric;
pub mod people;
pub mod projects;
pub mod recommendations;

pub use dashboard::{DashboardMetrics, NamedCount};
pub use evaluation::{
    EvaluationKind, EvaluationResult, ResumeEvaluation, ScoreBand, Severity, VerificationQuestion,
};
pub use people::{
    BasicInfo, CandidateDraft, CandidateId, CreatedEmployee, Education, Employee, EmployeeDraft,
    EmployeeId, PendingCandidate, Skill, WorkExperience,
};
pub use projects::{Assignment, AssignmentRequest, Project, ProjectDraft, ProjectPeriod, TechStack};
pub use recommendations::{
    Recommendation, RecommendationPriority, RecommendationRequest, SkillMatch,
};

/// Unknown fields carried through untouched.
pub type Extra = serde_json::Map<String, serde_json::Value>;
