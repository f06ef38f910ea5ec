use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evaluation::{EvaluationResult, ResumeEvaluation, VerificationQuestion};
use super::Extra;

/// Identifier of a registered employee (`U_…` on the server).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier of a pending applicant (`C_…` on the server).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub years_of_experience: f64,
    #[serde(default)]
    pub email: String,
}

/// A skill with its self-reported proficiency (`Beginner` … `Expert`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub years: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub main_tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub university: String,
}

/// Registered employee as returned by `GET /employees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub user_id: EmployeeId,
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_introduction: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_data: Option<EvaluationResult>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Applicant awaiting an approve/reject decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingCandidate {
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_data: Option<EvaluationResult>,
    #[serde(default)]
    pub verification_questions: Vec<VerificationQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl PendingCandidate {
    /// Submission time. The server writes naive timestamps in UTC, with either a
    /// `T` or a space between date and time.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.submitted_at.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    /// Whole days spent in the queue as of `now`.
    pub fn waiting_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.submitted_at()
            .map(|submitted| (now - submitted).num_days().max(0))
    }
}

/// Body for `POST /pending-candidates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub years_of_experience: f64,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub evaluation_data: serde_json::Value,
    #[serde(default)]
    pub verification_questions: Vec<VerificationQuestion>,
}

impl CandidateDraft {
    /// Carries the whole parse response as the candidate's evaluation data.
    pub fn from_resume(evaluation: &ResumeEvaluation) -> Self {
        Self {
            name: evaluation.name.clone(),
            email: evaluation.email.clone(),
            role: evaluation.role.clone(),
            years_of_experience: evaluation.years_of_experience,
            skills: evaluation.skills.clone(),
            work_experience: Vec::new(),
            certifications: Vec::new(),
            evaluation_data: serde_json::to_value(evaluation).unwrap_or_default(),
            verification_questions: Vec::new(),
        }
    }
}

/// Body for `POST /employees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub years_of_experience: f64,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_data: Option<EvaluationResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_questions: Vec<VerificationQuestion>,
    pub status: String,
}

impl EmployeeDraft {
    /// Builds the employee record that replaces a pending candidate.
    pub fn from_pending(candidate: &PendingCandidate) -> Self {
        Self {
            name: candidate.basic_info.name.clone(),
            email: candidate.basic_info.email.clone(),
            role: candidate.basic_info.role.clone(),
            years_of_experience: candidate.basic_info.years_of_experience,
            skills: candidate.skills.clone(),
            evaluation_data: candidate.evaluation_data.clone(),
            verification_questions: candidate.verification_questions.clone(),
            status: "active".to_string(),
        }
    }
}

/// Response of `POST /employees`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedEmployee {
    pub id: EmployeeId,
    #[serde(default)]
    pub message: String,
}
