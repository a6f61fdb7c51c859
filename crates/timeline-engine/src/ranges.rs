//! Partition a project's timeline into ordered segments.
//!
//! The project span is split at every sprint boundary into sprint-occupied segments and the
//! segments between them. Consecutive segments share their boundary date, except where the
//! gap-merge pass dropped a one-day "between sprints" sliver; there the next segment starts a day
//! after the previous one ends.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Project, Sprint, SprintId};
use crate::time::ONE_DAY;

/// What occupies a segment of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "sprint_id")]
pub enum RangeKind {
    /// Lead-in from the project start to the first sprint.
    ProjectLead,
    /// The days of the sprint itself.
    InnerSprint(SprintId),
    /// From the sprint's end to the next sprint (or the project end).
    OuterSprint(SprintId),
}

/// Renders the location tag used by timeline views: `ProjectStart`, `InnerSprint3`, `OuterSprint3`.
impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKind::ProjectLead => f.write_str("ProjectStart"),
            RangeKind::InnerSprint(id) => write!(f, "InnerSprint{id}"),
            RangeKind::OuterSprint(id) => write!(f, "OuterSprint{id}"),
        }
    }
}

/// A contiguous span of the project timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: RangeKind,
}

impl Range {
    pub fn new(start: NaiveDate, end: NaiveDate, kind: RangeKind) -> Self {
        Self { start, end, kind }
    }

    fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `project` into timeline segments.
///
/// `sprints` must be in ascending start-date order. Each sprint clips the trailing segment at its
/// start and appends its own segment plus a segment running to the project end. Zero-length
/// segments are then removed, one-day slivers between touching sprints are merged away, and a
/// redundant lead-in is dropped.
pub fn compute_ranges(project: &Project, sprints: &[Sprint]) -> Vec<Range> {
    let mut ranges = vec![Range::new(
        project.start_date,
        project.end_date,
        RangeKind::ProjectLead,
    )];

    for sprint in sprints {
        if let Some(trailing) = ranges.last_mut() {
            trailing.end = sprint.start_date;
        }
        ranges.push(Range::new(
            sprint.start_date,
            sprint.end_date,
            RangeKind::InnerSprint(sprint.id),
        ));
        ranges.push(Range::new(
            sprint.end_date,
            project.end_date,
            RangeKind::OuterSprint(sprint.id),
        ));
    }

    ranges.retain(|r| !r.is_empty());

    if ranges.len() >= 5 {
        merge_one_day_gaps(&mut ranges);
    }

    if ranges.len() >= 2 && ranges[0].start == ranges[1].start {
        ranges.remove(0);
    }

    tracing::info!(
        project_id = project.id,
        ranges = ranges.len(),
        "computed project ranges"
    );
    ranges
}

/// Drop the segment after `ranges[counter]` when the tracked `next` segment ends exactly one day
/// after `ranges[counter]` does.
///
/// `next` is deliberately not re-derived from `counter` on every step: after a step that merges
/// nothing it points at the current segment, which stops further merges. Removing a segment can
/// leave no segment two places ahead; the pass ends there.
fn merge_one_day_gaps(ranges: &mut Vec<Range>) {
    let mut next = ranges[2];
    let mut counter = 1;

    while counter + 2 < ranges.len() {
        let range = ranges[counter];

        if next.end - range.end == ONE_DAY {
            ranges.remove(counter + 1);
            match ranges.get(counter + 2) {
                Some(&following) => next = following,
                None => break,
            }
            counter += 1;
        } else {
            next = ranges[counter + 2];
            counter += 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lead(start: NaiveDate, end: NaiveDate) -> Range {
        Range::new(start, end, RangeKind::ProjectLead)
    }

    #[test]
    fn merge_removes_single_sliver() {
        let mut ranges = vec![
            lead(date(2022, 1, 1), date(2022, 2, 1)),
            Range::new(date(2022, 2, 1), date(2022, 2, 21), RangeKind::InnerSprint(1)),
            Range::new(date(2022, 2, 21), date(2022, 2, 22), RangeKind::OuterSprint(1)),
            Range::new(date(2022, 2, 22), date(2022, 3, 10), RangeKind::InnerSprint(2)),
            Range::new(date(2022, 3, 10), date(2022, 8, 31), RangeKind::OuterSprint(2)),
        ];
        merge_one_day_gaps(&mut ranges);

        let kinds: Vec<_> = ranges.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [
                RangeKind::ProjectLead,
                RangeKind::InnerSprint(1),
                RangeKind::InnerSprint(2),
                RangeKind::OuterSprint(2),
            ]
        );
    }

    #[test]
    fn merge_stops_when_nothing_lies_two_ahead() {
        // Three touching one-week sprints: the second merge empties the slot two places ahead.
        let mut ranges = vec![
            lead(date(2022, 1, 1), date(2022, 1, 3)),
            Range::new(date(2022, 1, 3), date(2022, 1, 9), RangeKind::InnerSprint(1)),
            Range::new(date(2022, 1, 9), date(2022, 1, 10), RangeKind::OuterSprint(1)),
            Range::new(date(2022, 1, 10), date(2022, 1, 16), RangeKind::InnerSprint(2)),
            Range::new(date(2022, 1, 16), date(2022, 1, 17), RangeKind::OuterSprint(2)),
            Range::new(date(2022, 1, 17), date(2022, 1, 31), RangeKind::InnerSprint(3)),
        ];
        merge_one_day_gaps(&mut ranges);

        let kinds: Vec<_> = ranges.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [
                RangeKind::ProjectLead,
                RangeKind::InnerSprint(1),
                RangeKind::InnerSprint(2),
                RangeKind::InnerSprint(3),
            ]
        );
    }

    #[test]
    fn kind_displays_location_tag() {
        assert_eq!(RangeKind::ProjectLead.to_string(), "ProjectStart");
        assert_eq!(RangeKind::InnerSprint(4).to_string(), "InnerSprint4");
        assert_eq!(RangeKind::OuterSprint(4).to_string(), "OuterSprint4");
    }
}
