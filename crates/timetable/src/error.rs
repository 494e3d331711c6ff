//! Error types for the timetable core.

use thiserror::Error;

/// Errors that can occur while validating section times or mutating a
/// schedule.
///
/// The detector and layout engine are total over well-formed input; these
/// errors surface at the validation/conversion boundary instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time string does not match the 24-hour "HH:mm" pattern
    #[error("Invalid time format: {time:?} (expected 24-hour \"HH:mm\")")]
    InvalidTimeFormat { time: String },

    /// End time is not strictly after start time
    #[error("Invalid time range: {start} to {end} (end must be after start)")]
    InvalidTimeRange { start: String, end: String },

    /// Referenced course does not exist in the schedule
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    /// Referenced section does not exist in the course
    #[error("Section not found: {section_id}")]
    SectionNotFound { section_id: String },
}

impl ScheduleError {
    /// Returns true if this error indicates malformed user input rather
    /// than a missing entity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidTimeFormat { .. } | ScheduleError::InvalidTimeRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_predicate() {
        let format = ScheduleError::InvalidTimeFormat {
            time: "25:00".to_string(),
        };
        let range = ScheduleError::InvalidTimeRange {
            start: "10:00".to_string(),
            end: "09:00".to_string(),
        };
        let missing = ScheduleError::CourseNotFound {
            course_id: "c1".to_string(),
        };

        assert!(format.is_validation());
        assert!(range.is_validation());
        assert!(!missing.is_validation());
    }
}
