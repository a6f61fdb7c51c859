//! Projects, sprints and their unsaved draft forms.
//!
//! `Project` and `Sprint` are already-persisted values: their dates are always present.
//! `ProjectDraft` and `SprintDraft` are what an edit form submits, so any date may be missing;
//! only the validators accept drafts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::labels::sprint_label;
use crate::time;

/// Months between a default project's start and end.
pub const DEFAULT_PROJECT_LENGTH_MONTHS: i32 = 8;

pub type ProjectId = u32;
pub type SprintId = u32;

/// A project: an inclusive date range owning an ordered list of sprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Sprints in this project, ascending by start date.
    #[serde(default)]
    pub sprints: Vec<Sprint>,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            start_date,
            end_date,
            sprints: Vec::new(),
        }
    }

    /// A fresh project named after the current year, running eight months from `today`.
    pub fn with_defaults(id: ProjectId, today: NaiveDate) -> Self {
        let name = format!("Project {}", today.year());
        Self {
            id,
            description: name.clone(),
            name,
            start_date: today,
            end_date: time::shift_months(today, DEFAULT_PROJECT_LENGTH_MONTHS),
            sprints: Vec::new(),
        }
    }

    /// Sort the owned sprints ascending by start date (ties keep their relative order).
    pub fn sort_sprints(&mut self) {
        self.sprints.sort_by_key(|s| s.start_date);
    }

    pub fn sprint(&self, id: SprintId) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    /// Every sprint except the one with `id`, in project order.
    pub fn siblings_of(&self, id: SprintId) -> Vec<Sprint> {
        self.sprints.iter().filter(|s| s.id != id).cloned().collect()
    }

    /// Label the next appended sprint would receive.
    pub fn next_sprint_label(&self) -> String {
        sprint_label(self.sprints.len() + 1)
    }
}

/// The sprint that starts first, whatever order `sprints` is in.
pub fn first_by_start(sprints: &[Sprint]) -> Option<&Sprint> {
    sprints.iter().min_by_key(|s| s.start_date)
}

/// The sprint that ends last, whatever order `sprints` is in.
pub fn last_by_end(sprints: &[Sprint]) -> Option<&Sprint> {
    sprints.iter().max_by_key(|s| s.end_date)
}

/// One iteration inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: SprintId,
    pub project_id: ProjectId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Sprint {
    /// Inclusive membership: both the start and end day belong to the sprint.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A sprint as submitted for creation or edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintDraft {
    pub label: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

impl SprintDraft {
    /// The submitted name, falling back to the label when no name was given.
    pub fn name_or_label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_default()
    }
}

impl From<&Sprint> for SprintDraft {
    fn from(sprint: &Sprint) -> Self {
        Self {
            label: Some(sprint.label.clone()),
            name: Some(sprint.name.clone()),
            start_date: Some(sprint.start_date),
            end_date: Some(sprint.end_date),
            description: sprint.description.clone(),
        }
    }
}

/// A project as submitted for creation or edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            start_date: Some(project.start_date),
            end_date: Some(project.end_date),
            description: project.description.clone(),
        }
    }
}
