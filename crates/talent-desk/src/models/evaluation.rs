use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::people::Skill;
use super::Extra;

/// Which server-side assessment to request for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Comprehensive,
    Quantitative,
    Qualitative,
    Domain,
}

impl EvaluationKind {
    /// Path segment of the endpoint, relative to the API base.
    pub const fn route(self) -> &'static str {
        match self {
            EvaluationKind::Comprehensive => "employee-evaluation",
            EvaluationKind::Quantitative => "quantitative-analysis",
            EvaluationKind::Qualitative => "qualitative-analysis",
            EvaluationKind::Domain => "domain-analysis",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EvaluationKind::Comprehensive => "comprehensive",
            EvaluationKind::Quantitative => "quantitative",
            EvaluationKind::Qualitative => "qualitative",
            EvaluationKind::Domain => "domain",
        }
    }
}

/// Scored snapshot of one candidate. Scores are computed server-side and
/// never derived locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(
        default,
        deserialize_with = "super::numeric::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "super::numeric::number_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub category_scores: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `POST /resume/parse`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeEvaluation {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub years_of_experience: f64,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub quantitative_score: f64,
    #[serde(default)]
    pub qualitative_analysis: String,
    #[serde(default, deserialize_with = "super::numeric::number_map")]
    pub domain_expertise: BTreeMap<String, f64>,
    #[serde(default)]
    pub file_key: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Interview prompt probing a resume claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationQuestion {
    #[serde(default)]
    pub category: String,
    pub question: String,
    #[serde(default)]
    pub reason: String,
    pub severity: Severity,
}

/// Display bucket for a server-provided score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 85.0 {
            ScoreBand::Strong
        } else if score >= 70.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "strong",
            ScoreBand::Fair => "fair",
            ScoreBand::Weak => "weak",
        }
    }
}
