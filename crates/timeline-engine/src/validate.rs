//! Validation of proposed sprints and projects.
//!
//! Validators never mutate their inputs and never stop at the first problem: every check runs and
//! every failure is recorded, except that date ordering and bounds checks are skipped when a
//! required date is missing. Callers must only persist when the returned sink is empty.

use chrono::NaiveDate;

use crate::bounds::PROJECT_LOOKBACK_YEARS;
use crate::model::{first_by_start, last_by_end, Project, ProjectDraft, Sprint, SprintDraft};
use crate::sink::{ErrorSink, Field, ValidationErrorKind};
use crate::time::{self, format_long, shift_years};

fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

/// Validate a proposed sprint against its project and sibling sprints.
///
/// Siblings sharing the candidate's label are treated as the candidate itself and skipped. Each
/// sibling whose days contain the candidate's start (or end) yields its own overlap error, so a
/// candidate straddling several siblings reports each of them.
pub fn validate_sprint(
    project: &Project,
    siblings: &[Sprint],
    sprint: &SprintDraft,
) -> ErrorSink {
    let mut errors = ErrorSink::new();

    if is_blank(sprint.name_or_label()) {
        errors.push(
            Field::SprintName,
            ValidationErrorKind::MissingRequiredField,
            "Sprint name cannot be blank.",
        );
    }

    if sprint.start_date.is_none() {
        errors.push(
            Field::SprintStartDate,
            ValidationErrorKind::MissingRequiredField,
            "Sprint start date is a required field.",
        );
    }
    if sprint.end_date.is_none() {
        errors.push(
            Field::SprintEndDate,
            ValidationErrorKind::MissingRequiredField,
            "Sprint end date is a required field.",
        );
    }

    if let (Some(start), Some(end)) = (sprint.start_date, sprint.end_date) {
        check_sprint_dates(&mut errors, project, siblings, sprint, start, end);
    }

    if !errors.is_empty() {
        tracing::debug!(
            project_id = project.id,
            errors = errors.len(),
            "sprint failed validation"
        );
    }
    errors
}

fn check_sprint_dates(
    errors: &mut ErrorSink,
    project: &Project,
    siblings: &[Sprint],
    sprint: &SprintDraft,
    start: NaiveDate,
    end: NaiveDate,
) {
    if start > end {
        errors.push(
            Field::SprintStartDate,
            ValidationErrorKind::DateOrderViolation,
            format!(
                "Sprint start date: {} must occur before Sprint end date: {}.",
                format_long(start),
                format_long(end)
            ),
        );
    }

    if start < project.start_date {
        errors.push(
            Field::SprintStartDate,
            ValidationErrorKind::OutOfProjectBounds,
            format!(
                "Sprint start date: {} must be after Project start date: {}.",
                format_long(start),
                format_long(project.start_date)
            ),
        );
    }

    if end > project.end_date {
        errors.push(
            Field::SprintEndDate,
            ValidationErrorKind::OutOfProjectBounds,
            format!(
                "Sprint end date: {} must be before Project end date: {}.",
                format_long(end),
                format_long(project.end_date)
            ),
        );
    }

    for other in siblings {
        if sprint.label.as_deref() == Some(other.label.as_str()) {
            continue;
        }

        if other.contains(start) {
            errors.push(
                Field::SprintStartDate,
                ValidationErrorKind::OverlapViolation,
                format!(
                    "Sprint start date: {} is overlapping with the dates in {}.",
                    format_long(start),
                    other.label
                ),
            );
        }
        if other.contains(end) {
            errors.push(
                Field::SprintEndDate,
                ValidationErrorKind::OverlapViolation,
                format!(
                    "Sprint end date: {} is overlapping with the dates in {}.",
                    format_long(end),
                    other.label
                ),
            );
        }
    }
}

/// Validate a proposed project using the local clock for "today".
pub fn validate_project(project: &ProjectDraft, sprints: &[Sprint]) -> ErrorSink {
    validate_project_at(project, sprints, time::today())
}

/// Validate a proposed project against the sprints it already owns.
///
/// The start date may not be more than a year before `today`, must not follow the end date, and
/// must not follow the first sprint's start; the end date must not precede the last sprint's end.
pub fn validate_project_at(
    project: &ProjectDraft,
    sprints: &[Sprint],
    today: NaiveDate,
) -> ErrorSink {
    let mut errors = ErrorSink::new();

    if is_blank(&project.name) {
        errors.push(
            Field::ProjectName,
            ValidationErrorKind::MissingRequiredField,
            "Project Name is a required field.",
        );
    }

    let Some(start) = project.start_date else {
        errors.push(
            Field::ProjectStartDate,
            ValidationErrorKind::MissingRequiredField,
            "Project start date is a required field.",
        );
        return errors;
    };
    let Some(end) = project.end_date else {
        errors.push(
            Field::ProjectEndDate,
            ValidationErrorKind::MissingRequiredField,
            "Project end date is a required field.",
        );
        return errors;
    };

    if start < shift_years(today, -PROJECT_LOOKBACK_YEARS) {
        errors.push(
            Field::ProjectStartDate,
            ValidationErrorKind::OutOfProjectBounds,
            format!(
                "Can't set project start date to: {} as it is more than a year ago.",
                format_long(start)
            ),
        );
    }

    if start > end {
        errors.push(
            Field::ProjectStartDate,
            ValidationErrorKind::DateOrderViolation,
            format!(
                "Project Start Date: {} must be before Project End Date: {}.",
                format_long(start),
                format_long(end)
            ),
        );
    }

    if let Some(first) = first_by_start(sprints) {
        if start > first.start_date {
            errors.push(
                Field::ProjectStartDate,
                ValidationErrorKind::OutOfProjectBounds,
                format!(
                    "Project Start date: {} cannot occur after {} Start date: {}.",
                    format_long(start),
                    first.label,
                    format_long(first.start_date)
                ),
            );
        }
    }
    if let Some(last) = last_by_end(sprints) {
        if end < last.end_date {
            errors.push(
                Field::ProjectEndDate,
                ValidationErrorKind::OutOfProjectBounds,
                format!(
                    "Project End date: {} cannot occur before {} End date: {}.",
                    format_long(end),
                    last.label,
                    format_long(last.end_date)
                ),
            );
        }
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "project failed validation");
    }
    errors
}

/// Check that a saved project still encloses its first and last sprints.
pub fn validate_sprint_containment(project: &Project) -> ErrorSink {
    let mut errors = ErrorSink::new();

    if let Some(first) = first_by_start(&project.sprints) {
        if first.start_date < project.start_date {
            errors.push(
                Field::ProjectStartDate,
                ValidationErrorKind::OverlapViolation,
                format!(
                    "Project start date: {} is overlapping with {} dates, as this sprints start date is {}.",
                    format_long(project.start_date),
                    first.label,
                    format_long(first.start_date)
                ),
            );
        }
    }
    if let Some(last) = last_by_end(&project.sprints) {
        if last.end_date > project.end_date {
            errors.push(
                Field::ProjectEndDate,
                ValidationErrorKind::OverlapViolation,
                format!(
                    "Project end date: {} is overlapping with {} dates, as this sprints end date is {}.",
                    format_long(project.end_date),
                    last.label,
                    format_long(last.end_date)
                ),
            );
        }
    }

    errors
}
