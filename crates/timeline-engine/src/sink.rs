//! Per-call collection of validation errors.
//!
//! Every validating operation returns its own [`ErrorSink`]. Nothing is shared between calls,
//! so concurrent validations cannot see each other's errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Form field an error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    ProjectName,
    ProjectStartDate,
    ProjectEndDate,
    SprintName,
    SprintStartDate,
    SprintEndDate,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ProjectName => "ProjectName",
            Field::ProjectStartDate => "ProjectStartDate",
            Field::ProjectEndDate => "ProjectEndDate",
            Field::SprintName => "SprintName",
            Field::SprintStartDate => "SprintStartDate",
            Field::SprintEndDate => "SprintEndDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// A required value (name, start or end date) is missing or blank.
    MissingRequiredField,
    /// A start date falls after its end date.
    DateOrderViolation,
    /// A date falls outside the window its owner allows.
    OutOfProjectBounds,
    /// Two sprints share at least one day.
    OverlapViolation,
    /// No room is left in the project for another sprint.
    InsufficientTimeForNewSprint,
}

/// A single user-facing validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors accumulated by one validate-then-save operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSink {
    errors: Vec<ValidationError>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, kind: ValidationErrorKind, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, kind, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Errors reported against `field`, in the order they were found.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// `Ok(())` when clean, otherwise every error wrapped in [`TimelineError::Validation`].
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(TimelineError::Validation(self.errors))
        }
    }
}

impl IntoIterator for ErrorSink {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorSink {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
