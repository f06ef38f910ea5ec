use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPeriod {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub duration_months: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub infra: Vec<String>,
}

impl TechStack {
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.backend
            .iter()
            .chain(&self.frontend)
            .chain(&self.data)
            .chain(&self.infra)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub client_industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<ProjectPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: TechStack,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body for `POST /projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub project_name: String,
    pub client_industry: String,
    pub period: ProjectPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tech_stack: TechStack,
    pub requirements: Vec<String>,
}

impl ProjectDraft {
    pub fn new(project_name: &str, client_industry: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            project_name: project_name.to_string(),
            client_industry: client_industry.to_string(),
            period: ProjectPeriod {
                start: start.format("%Y-%m-%d").to_string(),
                end: end.format("%Y-%m-%d").to_string(),
                duration_months: months_between(start, end),
            },
            budget_scale: None,
            description: None,
            tech_stack: TechStack::default(),
            requirements: Vec::new(),
        }
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let days = (end - start).num_days().max(0) as f64;
    (days / 30.0).round()
}

/// Body for `POST /projects/{projectId}/assign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub employee_id: String,
    pub role: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub allocation_rate: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_reason: Option<String>,
}

/// Confirmation echoed back by the assign endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, deserialize_with = "super::numeric::number")]
    pub allocation_rate: f64,
    #[serde(flatten)]
    pub extra: Extra,
}
