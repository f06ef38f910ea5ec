use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Extra;

/// Which factor the recommendation engine weighs most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Skill,
    Affinity,
    #[default]
    Balanced,
}

impl RecommendationPriority {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendationPriority::Skill => "skill",
            RecommendationPriority::Affinity => "affinity",
            RecommendationPriority::Balanced => "balanced",
        }
    }
}

impl FromStr for RecommendationPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skill" => Ok(Self::Skill),
            "affinity" => Ok(Self::Affinity),
            "balanced" => Ok(Self::Balanced),
            other => Err(format!(
                "unknown priority '{other}' (expected skill, affinity or balanced)"
            )),
        }
    }
}

/// Body for `POST /recommendations`. An empty skill list lets the server fall
/// back to the project's tech stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub project_id: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub team_size: u32,
    #[serde(default)]
    pub priority: RecommendationPriority,
}

impl RecommendationRequest {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            required_skills: Vec::new(),
            team_size: 5,
            priority: RecommendationPriority::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub level: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub years: f64,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub score: f64,
}

/// One ranked employee with the server's reasoning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub overall_score: f64,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub skill_match_score: f64,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub similarity_score: f64,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub affinity_score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub skill_details: Vec<SkillMatch>,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub years_of_experience: f64,
    /// `Available`, `Busy` or `Unknown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_project: Option<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Recommendation {
    pub fn is_available(&self) -> bool {
        self.availability
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case("available"))
    }
}
