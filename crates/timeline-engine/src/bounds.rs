//! Legal date windows for sprint and project edits.
//!
//! A window is inclusive on both ends. Sprint windows are derived from the neighbouring sprints
//! (the sprint before and the sprint after in start-date order) and the project bounds; project
//! windows are derived from the current date and the project's first and last sprints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::model::{first_by_start, last_by_end, Project, Sprint};
use crate::sink::{ErrorSink, Field, ValidationErrorKind};
use crate::time::{self, add_days, shift_years};

/// Default length of a newly created sprint.
pub const DEFAULT_SPRINT_LENGTH_DAYS: i64 = 21;
/// How far in the past a project may start.
pub const PROJECT_LOOKBACK_YEARS: i32 = 1;
/// How far in the future a project's dates may be pushed.
pub const PROJECT_HORIZON_YEARS: i32 = 5;

/// An inclusive `[min, max]` date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// Lower `max` so a start date stays at least one day before an already chosen `end`.
    pub fn cap_before_end(self, end: NaiveDate) -> Self {
        let latest_start = add_days(end, -1);
        Self {
            min: self.min,
            max: self.max.min(latest_start),
        }
    }
}

/// Start and end dates proposed for a brand-new sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSprintDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The sprints immediately before and after `sprint`, ignoring `sprint` itself.
///
/// Position is decided by start date; a sibling sharing `sprint`'s start date counts as following it.
fn neighbours<'a>(
    siblings: &'a [Sprint],
    sprint: &Sprint,
) -> (Option<&'a Sprint>, Option<&'a Sprint>) {
    let mut ordered: Vec<&Sprint> = siblings.iter().filter(|s| s.id != sprint.id).collect();
    ordered.sort_by_key(|s| s.start_date);

    let position = ordered.partition_point(|s| s.start_date < sprint.start_date);
    let previous = position.checked_sub(1).map(|i| ordered[i]);
    let next = ordered.get(position).copied();
    (previous, next)
}

/// Window for a sprint's start date.
///
/// For an existing sprint the window runs from the day after the previous sprint ends (or the
/// project start) to the day before the next sprint starts (or the project end). For a new sprint
/// (`sprint == None`) it opens the day after the last sibling ends and closes a day before the
/// project end, leaving room for at least a one-day sprint.
pub fn sprint_start_bounds(
    project: &Project,
    siblings: &[Sprint],
    sprint: Option<&Sprint>,
) -> DateBounds {
    let bounds = match sprint {
        None => {
            let min = last_by_end(siblings)
                .map(|last| add_days(last.end_date, 1))
                .unwrap_or(project.start_date);
            DateBounds::new(min, add_days(project.end_date, -1))
        }
        Some(sprint) => {
            let (previous, next) = neighbours(siblings, sprint);
            let min = previous
                .map(|p| add_days(p.end_date, 1))
                .unwrap_or(project.start_date);
            let max = next
                .map(|n| add_days(n.start_date, -1))
                .unwrap_or(project.end_date);
            DateBounds::new(min, max)
        }
    };

    tracing::debug!(
        project_id = project.id,
        min = %bounds.min,
        max = %bounds.max,
        "sprint start bounds"
    );
    bounds
}

/// Window for an existing sprint's end date: from the day after it starts to the day before the
/// next sprint starts (or the project end).
pub fn sprint_end_bounds(project: &Project, siblings: &[Sprint], sprint: &Sprint) -> DateBounds {
    let (_, next) = neighbours(siblings, sprint);
    let max = next
        .map(|n| add_days(n.start_date, -1))
        .unwrap_or(project.end_date);
    let bounds = DateBounds::new(add_days(sprint.start_date, 1), max);

    tracing::debug!(
        project_id = project.id,
        sprint_id = sprint.id,
        min = %bounds.min,
        max = %bounds.max,
        "sprint end bounds"
    );
    bounds
}

/// Dates for a new sprint appended after `existing`.
///
/// The sprint starts the day after the latest existing sprint ends (or on the project start) and
/// runs for [`DEFAULT_SPRINT_LENGTH_DAYS`], truncated at the project end.
///
/// # Errors
/// - [`TimelineError::InsufficientTime`] if the start would land on or after the project end.
/// - [`TimelineError::SprintDatesOverlap`] if the end would not fall after the start.
pub fn default_sprint_dates(project: &Project, existing: &[Sprint]) -> Result<DefaultSprintDates> {
    let start_date = last_by_end(existing)
        .map(|last| add_days(last.end_date, 1))
        .unwrap_or(project.start_date);

    if start_date >= project.end_date {
        tracing::debug!(project_id = project.id, %start_date, "no room for another sprint");
        return Err(TimelineError::InsufficientTime);
    }

    let end_date = add_days(start_date, DEFAULT_SPRINT_LENGTH_DAYS).min(project.end_date);
    // Unreachable: start_date < project.end_date, and add_days saturates rather than wrapping.
    if end_date <= start_date {
        return Err(TimelineError::SprintDatesOverlap);
    }

    Ok(DefaultSprintDates {
        start_date,
        end_date,
    })
}

/// Check whether a new sprint fits after `existing`, reporting the failure as a field error.
///
/// Returns an empty sink when [`default_sprint_dates`] would succeed.
pub fn check_room_for_sprint(project: &Project, existing: &[Sprint]) -> ErrorSink {
    let mut errors = ErrorSink::new();
    if let Err(err) = default_sprint_dates(project, existing) {
        let kind = match err {
            TimelineError::InsufficientTime => ValidationErrorKind::InsufficientTimeForNewSprint,
            _ => ValidationErrorKind::DateOrderViolation,
        };
        errors.push(Field::SprintStartDate, kind, format!("{err}."));
    }
    errors
}

/// Window for a project's start date, using the local clock for "today".
pub fn project_start_bounds(project: &Project) -> DateBounds {
    project_start_bounds_at(project, time::today())
}

/// Window for a project's start date relative to `today`.
///
/// The lower bound is a year before `today`, or the current start if that is earlier. The upper
/// bound is five years after `today`, or the first sprint's start if the project has sprints.
pub fn project_start_bounds_at(project: &Project, today: NaiveDate) -> DateBounds {
    let min = shift_years(today, -PROJECT_LOOKBACK_YEARS).min(project.start_date);
    let max = first_by_start(&project.sprints)
        .map(|first| first.start_date)
        .unwrap_or_else(|| shift_years(today, PROJECT_HORIZON_YEARS));
    DateBounds::new(min, max)
}

/// Window for a project's end date, using the local clock for "today".
pub fn project_end_bounds(project: &Project) -> DateBounds {
    project_end_bounds_at(project, time::today())
}

/// Window for a project's end date relative to `today`.
///
/// The lower bound is the last sprint's end (or the day after the project start), never earlier
/// than `today`. The upper bound is five years and a day after the project start, pushed to the
/// day after the lower bound if that would not be later.
pub fn project_end_bounds_at(project: &Project, today: NaiveDate) -> DateBounds {
    let min = last_by_end(&project.sprints)
        .map(|last| last.end_date)
        .unwrap_or_else(|| add_days(project.start_date, 1))
        .max(today);

    let horizon = add_days(shift_years(project.start_date, PROJECT_HORIZON_YEARS), 1);
    let max = if horizon > min { horizon } else { add_days(min, 1) };
    DateBounds::new(min, max)
}
