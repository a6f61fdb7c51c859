//! Sequence labels ("Sprint 1", "Sprint 2", ...) and relabelling after removal.

use crate::error::{Result, TimelineError};
use crate::model::{Project, Sprint, SprintId};

/// The label for the `position`-th sprint of a project (1-based).
pub fn sprint_label(position: usize) -> String {
    format!("Sprint {position}")
}

/// Sort `sprints` by start date and label them "Sprint 1", "Sprint 2", ... in that order.
pub fn relabel_sprints(sprints: &mut [Sprint]) {
    sprints.sort_by_key(|s| s.start_date);
    for (index, sprint) in sprints.iter_mut().enumerate() {
        sprint.label = sprint_label(index + 1);
    }
}

/// Remove the sprint with `id` from `project` and relabel the sprints that remain.
///
/// # Errors
/// Returns [`TimelineError::SprintNotFound`] if the project owns no sprint with that id.
pub fn remove_sprint(project: &mut Project, id: SprintId) -> Result<Sprint> {
    let index = project
        .sprints
        .iter()
        .position(|s| s.id == id)
        .ok_or(TimelineError::SprintNotFound(id))?;

    let removed = project.sprints.remove(index);
    relabel_sprints(&mut project.sprints);

    tracing::info!(
        project_id = project.id,
        sprint_id = id,
        remaining = project.sprints.len(),
        "removed sprint and relabelled the rest"
    );

    Ok(removed)
}
