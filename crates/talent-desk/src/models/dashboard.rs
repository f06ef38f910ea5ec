use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// Headline counters from `GET /dashboard/metrics`; the many breakdown
/// sections stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub active_projects: u64,
    #[serde(default)]
    pub available_employees: u64,
    #[serde(default)]
    pub pending_candidates: u64,
    #[serde(default)]
    pub top_skills: Vec<NamedCount>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DashboardMetrics {
    /// Share of employees currently on a project, in percent.
    pub fn utilization_percent(&self) -> Option<f64> {
        if self.total_employees == 0 {
            return None;
        }
        let assigned = self.total_employees.saturating_sub(self.available_employees);
        Some(assigned as f64 * 100.0 / self.total_employees as f64)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Employees: {}", self.total_employees),
            format!("Active projects: {}", self.active_projects),
            format!("Available employees: {}", self.available_employees),
            format!("Pending candidates: {}", self.pending_candidates),
        ];
        if let Some(rate) = self.utilization_percent() {
            lines.push(format!("Utilization: {rate:.1}%"));
        }
        if !self.top_skills.is_empty() {
            let skills = self
                .top_skills
                .iter()
                .map(|skill| format!("{} ({})", skill.name, skill.count))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Top skills: {skills}"));
        }
        lines
    }
}
