//! Conflict detection and weekly calendar layout for a student timetable
//! planner.
//!
//! This crate is the pure core behind a class-scheduling UI: it converts
//! heterogeneous day/time records into comparable week-minute intervals,
//! detects every pairwise overlap among the selected sections of a
//! schedule, keeps the derived `hasConflict` flag on each section
//! consistent after every mutation, and packs overlapping calendar events
//! into side-by-side columns for rendering.
//!
//! Everything here is synchronous and stateless across calls; correctness
//! comes from full recomputation after each mutation rather than from
//! incremental caches. Persistence, catalog import, export formats, and
//! the UI itself are external consumers that serialize the same
//! [`Schedule`] shape this crate operates on.

pub mod conflict;
pub mod error;
pub mod layout;
pub mod schedule;
pub mod time;
pub mod types;

pub use conflict::{blocks_overlap, detect_conflicts, recompute_flags, section_to_time_block};
pub use error::ScheduleError;
pub use layout::{
    event_position, layout_day, EventPosition, LayoutAssignment, DEFAULT_GRID_END_HOUR,
    DEFAULT_GRID_START_HOUR,
};
pub use schedule::{generate_id, CourseUpdate, NewSection, ScheduleStats, SectionUpdate};
pub use types::{CalendarEvent, Conflict, Course, DayOfWeek, Schedule, Section, TimeBlock};
