//! Core data model: schedules, courses, sections, and the derived
//! time-block/conflict/event views the engine computes from them.
//!
//! The whole object graph serializes with camelCase field names; the
//! surrounding application persists and shares exactly this shape, so the
//! wire format lives here rather than in any import/export layer.

use serde::{Deserialize, Serialize};

/// Day of the week with a fixed Monday-first ordering.
///
/// The numeric index is what linearizes the week for interval comparison,
/// so the ordering is part of the contract, not a display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in index order, for iterating a render pass over the week.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Numerical index of this day (Monday = 0, Sunday = 6).
    pub fn index(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

/// A single section of a course (e.g., G1, G2, L1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique identifier
    pub id: String,

    /// Display code shown to students (e.g., "G1")
    pub section_id: String,

    pub day: DayOfWeek,

    /// Start time in 24-hour "HH:mm"; empty for unscheduled placeholder
    /// sections (e.g., a project-experience slot with no fixed meeting)
    pub start_time: String,

    /// End time in 24-hour "HH:mm", strictly after the start time
    pub end_time: String,

    pub instructor: String,

    /// Optional venue/location
    pub venue: Option<String>,

    /// Optional free-text notes (e.g., bidding price, preferences)
    pub notes: Option<String>,

    /// Whether the student has chosen this section for their draft schedule
    pub is_selected: bool,

    /// Derived: whether this section overlaps another selected section.
    /// Recomputed wholesale by the conflict propagator, never hand-set.
    pub has_conflict: bool,
}

impl Section {
    /// Returns true if this section has concrete meeting times.
    ///
    /// Placeholder sections carry empty time strings; they never
    /// participate in conflict detection or calendar layout.
    pub fn is_scheduled(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }
}

/// A course/module (e.g., CS202) owning its available sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier
    pub id: String,

    /// e.g., "CS202"
    pub course_code: String,

    /// e.g., "Design and Analysis of Algorithms"
    pub course_name: String,

    pub sections: Vec<Section>,

    /// Hex color used by the calendar rendering; the core carries it
    /// through to events but never interprets it
    pub color: String,
}

/// A complete timetable draft: a named, ordered list of courses.
///
/// Conflict detection operates over exactly one schedule's selected
/// sections at a time; cross-schedule conflicts are never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Unique identifier
    pub id: String,

    /// User-defined name (e.g., "Dream Schedule", "Backup Plan")
    pub name: String,

    pub courses: Vec<Course>,

    /// Creation timestamp, epoch milliseconds
    pub created_at: i64,

    /// Last-mutation timestamp, epoch milliseconds
    pub updated_at: i64,
}

/// Week-linearized interval for a section, used for overlap comparison.
///
/// Transient: recomputed from the schedule's current selection state on
/// every detection pass, never persisted or cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub day: DayOfWeek,

    /// 0-6 (Monday = 0)
    pub day_index: u32,

    /// Minutes from Monday 00:00 (0-10079)
    pub start_minutes: u32,

    /// Minutes from Monday 00:00, exclusive end of the interval
    pub end_minutes: u32,

    pub course_id: String,
    pub section_id: String,
}

/// One unordered pair of overlapping selected sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The two section ids involved
    pub section_ids: Vec<String>,

    /// The owning course ids, in the same order as `section_ids`
    pub course_ids: Vec<String>,

    /// Representative overlap region (the first block of the pair)
    pub time_block: TimeBlock,
}

/// Display projection of a selected section for the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// The underlying section's unique id
    pub id: String,

    pub course_code: String,
    pub course_name: String,

    /// Display code of the section (e.g., "G1")
    pub section_id: String,

    pub instructor: String,
    pub venue: Option<String>,
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub has_conflict: bool,
}

impl CalendarEvent {
    /// True if the event has concrete times and can be placed on the grid.
    pub fn is_scheduled(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }
}
