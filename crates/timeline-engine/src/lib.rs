//! # timeline-engine
//!
//! Date-window arithmetic for projects and their sprints.
//!
//! A project is an inclusive calendar range; its sprints are non-overlapping, project-bounded
//! sub-ranges. This crate answers three questions about such a project without touching storage:
//! where may a sprint's dates legally go, is a proposed sprint or project valid, and how does the
//! project's timeline split into sprint and between-sprint segments.
//!
//! ## Modules
//!
//! - [`time`] -- Calendar-day arithmetic and the [`time::ONE_DAY`] constant
//! - [`model`] -- `Project`, `Sprint` and their unsaved draft forms
//! - [`bounds`] -- Legal start/end windows and default dates for new sprints
//! - [`validate`] -- Overlap, ordering and bounds validation
//! - [`ranges`] -- Partition a project into ordered timeline segments
//! - [`sink`] -- Per-call collection of validation errors
//! - [`labels`] -- "Sprint N" labels and relabelling after removal
//! - [`error`] -- Error types

pub mod bounds;
pub mod error;
pub mod labels;
pub mod model;
pub mod ranges;
pub mod sink;
pub mod time;
pub mod validate;

pub use bounds::{
    check_room_for_sprint, default_sprint_dates, project_end_bounds, project_end_bounds_at,
    project_start_bounds, project_start_bounds_at, sprint_end_bounds, sprint_start_bounds,
    DateBounds,
};
pub use error::{Result, TimelineError};
pub use labels::{relabel_sprints, remove_sprint, sprint_label};
pub use model::{Project, ProjectDraft, ProjectId, Sprint, SprintDraft, SprintId};
pub use ranges::{compute_ranges, Range, RangeKind};
pub use sink::{ErrorSink, Field, ValidationError, ValidationErrorKind};
pub use validate::{
    validate_project, validate_project_at, validate_sprint, validate_sprint_containment,
};
