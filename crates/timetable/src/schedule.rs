//! Schedule mutation API.
//!
//! Operations are plain value transformations: the caller owns the
//! mutable `Schedule` slot and serializes mutations. Every operation
//! that can change the selected set or any section's day/time re-runs
//! the conflict propagator before returning, so `has_conflict` never
//! goes stale.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::conflict::recompute_flags;
use crate::error::ScheduleError;
use crate::time::{time_to_minutes, validate_section_times};
use crate::types::{CalendarEvent, Course, DayOfWeek, Schedule, Section};

/// Generates a unique id: epoch milliseconds plus a random suffix.
pub fn generate_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Input payload for a new section. Identity and the derived fields are
/// assigned by the schedule; new sections enter unselected.
#[derive(Debug, Clone)]
pub struct NewSection {
    pub section_id: String,
    pub day: DayOfWeek,
    /// "HH:mm", or empty together with `end_time` for a placeholder
    pub start_time: String,
    pub end_time: String,
    pub instructor: String,
    pub venue: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an existing section. `None` leaves a field
/// unchanged; the double-`Option` fields distinguish "leave as is" from
/// "clear".
#[derive(Debug, Clone, Default)]
pub struct SectionUpdate {
    pub section_id: Option<String>,
    pub day: Option<DayOfWeek>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub instructor: Option<String>,
    pub venue: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

/// Partial update for a course. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub color: Option<String>,
}

/// Summary numbers for the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleStats {
    pub courses: usize,
    pub selected_sections: usize,
    /// Selected sections currently flagged as conflicting
    pub conflicted_sections: usize,
    /// Total selected class time per week, in minutes
    pub weekly_minutes: u32,
}

impl Schedule {
    /// Creates a new empty schedule with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp_millis();
        Schedule {
            id: generate_id(),
            name: name.into(),
            courses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the schedule.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Deep-copies the schedule under fresh ids throughout, so the copy
    /// can be mutated independently of the original.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now().timestamp_millis();
        Schedule {
            id: generate_id(),
            name: format!("{} (Copy)", self.name),
            courses: self
                .courses
                .iter()
                .map(|course| Course {
                    id: generate_id(),
                    sections: course
                        .sections
                        .iter()
                        .map(|section| Section {
                            id: generate_id(),
                            ..section.clone()
                        })
                        .collect(),
                    ..course.clone()
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds an empty course and returns its id.
    pub fn add_course(
        &mut self,
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        color: impl Into<String>,
    ) -> String {
        let course = Course {
            id: generate_id(),
            course_code: course_code.into(),
            course_name: course_name.into(),
            sections: Vec::new(),
            color: color.into(),
        };
        let id = course.id.clone();
        debug!("Adding course {} ({})", course.course_code, id);
        self.courses.push(course);
        self.touch();
        id
    }

    /// Removes a course and everything it owns. Selected sections
    /// disappear with it, so conflict flags are re-derived.
    pub fn delete_course(&mut self, course_id: &str) -> Result<(), ScheduleError> {
        let before = self.courses.len();
        self.courses.retain(|course| course.id != course_id);
        if self.courses.len() == before {
            return Err(ScheduleError::CourseNotFound {
                course_id: course_id.to_string(),
            });
        }
        recompute_flags(self);
        self.touch();
        Ok(())
    }

    /// Applies a partial update to a course's descriptive fields.
    pub fn update_course(
        &mut self,
        course_id: &str,
        update: CourseUpdate,
    ) -> Result<(), ScheduleError> {
        let course = self.course_mut(course_id)?;
        if let Some(code) = update.course_code {
            course.course_code = code;
        }
        if let Some(name) = update.course_name {
            course.course_name = name;
        }
        if let Some(color) = update.color {
            course.color = color;
        }
        self.touch();
        Ok(())
    }

    /// Adds a section to a course after validating its times, and
    /// returns the new section's id.
    ///
    /// # Returns
    /// * `Err(InvalidTimeFormat)` - A time string fails the "HH:mm" pattern
    /// * `Err(InvalidTimeRange)` - End is not strictly after start
    /// * `Err(CourseNotFound)` - Unknown course id
    pub fn add_section(
        &mut self,
        course_id: &str,
        new: NewSection,
    ) -> Result<String, ScheduleError> {
        validate_section_times(&new.start_time, &new.end_time)?;

        let course = self.course_mut(course_id)?;
        let section = Section {
            id: generate_id(),
            section_id: new.section_id,
            day: new.day,
            start_time: new.start_time,
            end_time: new.end_time,
            instructor: new.instructor,
            venue: new.venue,
            notes: new.notes,
            is_selected: false,
            has_conflict: false,
        };
        let id = section.id.clone();
        debug!(
            "Adding section {} to course {} ({} {}-{})",
            section.section_id, course_id, section.day, section.start_time, section.end_time
        );
        course.sections.push(section);
        recompute_flags(self);
        self.touch();
        Ok(id)
    }

    /// Removes a section from a course.
    pub fn delete_section(
        &mut self,
        course_id: &str,
        section_id: &str,
    ) -> Result<(), ScheduleError> {
        let course = self.course_mut(course_id)?;
        let before = course.sections.len();
        course.sections.retain(|section| section.id != section_id);
        if course.sections.len() == before {
            return Err(ScheduleError::SectionNotFound {
                section_id: section_id.to_string(),
            });
        }
        recompute_flags(self);
        self.touch();
        Ok(())
    }

    /// Applies a partial update to a section, validating the resulting
    /// time pair before anything changes.
    pub fn update_section(
        &mut self,
        course_id: &str,
        section_id: &str,
        update: SectionUpdate,
    ) -> Result<(), ScheduleError> {
        let course = self.course_mut(course_id)?;
        let section = course
            .sections
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or_else(|| ScheduleError::SectionNotFound {
                section_id: section_id.to_string(),
            })?;

        let start = update.start_time.as_deref().unwrap_or(&section.start_time);
        let end = update.end_time.as_deref().unwrap_or(&section.end_time);
        validate_section_times(start, end)?;

        if let Some(display) = update.section_id {
            section.section_id = display;
        }
        if let Some(day) = update.day {
            section.day = day;
        }
        if let Some(start) = update.start_time {
            section.start_time = start;
        }
        if let Some(end) = update.end_time {
            section.end_time = end;
        }
        if let Some(instructor) = update.instructor {
            section.instructor = instructor;
        }
        if let Some(venue) = update.venue {
            section.venue = venue;
        }
        if let Some(notes) = update.notes {
            section.notes = notes;
        }

        recompute_flags(self);
        self.touch();
        Ok(())
    }

    /// Toggles a section in or out of the draft selection and returns
    /// the new state. Conflicts are advisory: a conflicting section can
    /// stay selected, it is only flagged.
    pub fn toggle_section(
        &mut self,
        course_id: &str,
        section_id: &str,
    ) -> Result<bool, ScheduleError> {
        let course = self.course_mut(course_id)?;
        let section = course
            .sections
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or_else(|| ScheduleError::SectionNotFound {
                section_id: section_id.to_string(),
            })?;

        section.is_selected = !section.is_selected;
        let selected = section.is_selected;
        debug!(
            "Toggled section {} in course {} -> selected={}",
            section_id, course_id, selected
        );

        recompute_flags(self);
        self.touch();
        Ok(selected)
    }

    /// Projects every selected section into a display event.
    pub fn selected_events(&self) -> Vec<CalendarEvent> {
        self.courses
            .iter()
            .flat_map(|course| {
                course
                    .sections
                    .iter()
                    .filter(|section| section.is_selected)
                    .map(|section| CalendarEvent {
                        id: section.id.clone(),
                        course_code: course.course_code.clone(),
                        course_name: course.course_name.clone(),
                        section_id: section.section_id.clone(),
                        instructor: section.instructor.clone(),
                        venue: section.venue.clone(),
                        day: section.day,
                        start_time: section.start_time.clone(),
                        end_time: section.end_time.clone(),
                        color: course.color.clone(),
                        has_conflict: section.has_conflict,
                    })
            })
            .collect()
    }

    /// Selected events for one day, in course-then-section order; this is
    /// what a render pass feeds to the layout engine.
    pub fn events_for_day(&self, day: DayOfWeek) -> Vec<CalendarEvent> {
        self.selected_events()
            .into_iter()
            .filter(|event| event.day == day)
            .collect()
    }

    /// Summary numbers for the stats bar. Weekly minutes only count
    /// scheduled sections; placeholders contribute nothing.
    pub fn stats(&self) -> ScheduleStats {
        let mut selected_sections = 0;
        let mut conflicted_sections = 0;
        let mut weekly_minutes = 0;

        for section in self
            .courses
            .iter()
            .flat_map(|course| &course.sections)
            .filter(|section| section.is_selected)
        {
            selected_sections += 1;
            if section.has_conflict {
                conflicted_sections += 1;
            }
            if section.is_scheduled() {
                if let (Ok(start), Ok(end)) = (
                    time_to_minutes(&section.start_time),
                    time_to_minutes(&section.end_time),
                ) {
                    weekly_minutes += end.saturating_sub(start);
                }
            }
        }

        ScheduleStats {
            courses: self.courses.len(),
            selected_sections,
            conflicted_sections,
            weekly_minutes,
        }
    }

    fn course_mut(&mut self, course_id: &str) -> Result<&mut Course, ScheduleError> {
        self.courses
            .iter_mut()
            .find(|course| course.id == course_id)
            .ok_or_else(|| ScheduleError::CourseNotFound {
                course_id: course_id.to_string(),
            })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_section(day: DayOfWeek, start: &str, end: &str) -> NewSection {
        NewSection {
            section_id: "G1".to_string(),
            day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            instructor: "Prof".to_string(),
            venue: Some("SR 2-1".to_string()),
            notes: None,
        }
    }

    fn flag(schedule: &Schedule, section_id: &str) -> bool {
        schedule
            .courses
            .iter()
            .flat_map(|c| &c.sections)
            .find(|s| s.id == section_id)
            .map(|s| s.has_conflict)
            .unwrap()
    }

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(a.contains('-'));
    }

    #[test]
    fn test_add_section_validates_times() {
        let mut schedule = Schedule::new("Draft");
        let course = schedule.add_course("CS202", "Algorithms", "#3b82f6");

        let err = schedule
            .add_section(&course, new_section(DayOfWeek::Monday, "8:70", "11:30"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeFormat { .. }));

        let err = schedule
            .add_section(&course, new_section(DayOfWeek::Monday, "11:30", "08:15"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));

        // Placeholder with no times is fine
        schedule
            .add_section(&course, new_section(DayOfWeek::Monday, "", ""))
            .unwrap();

        let err = schedule
            .add_section("nope", new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::CourseNotFound { .. }));
    }

    #[test]
    fn test_toggle_drives_conflict_flags() {
        let mut schedule = Schedule::new("Draft");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");
        let is = schedule.add_course("IS214", "Process Analysis", "#a855f7");

        let g1 = schedule
            .add_section(&cs, new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap();
        let g2 = schedule
            .add_section(&is, new_section(DayOfWeek::Monday, "10:00", "12:00"))
            .unwrap();

        // Nothing selected, nothing conflicting
        assert!(!flag(&schedule, &g1) && !flag(&schedule, &g2));

        schedule.toggle_section(&cs, &g1).unwrap();
        assert!(!flag(&schedule, &g1));

        schedule.toggle_section(&is, &g2).unwrap();
        assert!(flag(&schedule, &g1) && flag(&schedule, &g2));

        // Deselecting one clears both
        assert!(!schedule.toggle_section(&is, &g2).unwrap());
        assert!(!flag(&schedule, &g1) && !flag(&schedule, &g2));
    }

    #[test]
    fn test_update_section_time_revalidates_and_recomputes() {
        let mut schedule = Schedule::new("Draft");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");
        let is = schedule.add_course("IS214", "Process Analysis", "#a855f7");
        let g1 = schedule
            .add_section(&cs, new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap();
        let g2 = schedule
            .add_section(&is, new_section(DayOfWeek::Monday, "11:30", "12:45"))
            .unwrap();
        schedule.toggle_section(&cs, &g1).unwrap();
        schedule.toggle_section(&is, &g2).unwrap();

        // Back to back: no conflict
        assert!(!flag(&schedule, &g1) && !flag(&schedule, &g2));

        // Pull G2 forward so it overlaps G1
        schedule
            .update_section(
                &is,
                &g2,
                SectionUpdate {
                    start_time: Some("11:00".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(flag(&schedule, &g1) && flag(&schedule, &g2));

        // Resulting range is validated against the unchanged end time
        let err = schedule
            .update_section(
                &is,
                &g2,
                SectionUpdate {
                    start_time: Some("13:00".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));
    }

    #[test]
    fn test_delete_course_clears_partner_flags() {
        let mut schedule = Schedule::new("Draft");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");
        let is = schedule.add_course("IS214", "Process Analysis", "#a855f7");
        let g1 = schedule
            .add_section(&cs, new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap();
        let g2 = schedule
            .add_section(&is, new_section(DayOfWeek::Monday, "10:00", "12:00"))
            .unwrap();
        schedule.toggle_section(&cs, &g1).unwrap();
        schedule.toggle_section(&is, &g2).unwrap();
        assert!(flag(&schedule, &g1));

        schedule.delete_course(&is).unwrap();
        assert_eq!(schedule.courses.len(), 1);
        assert!(!flag(&schedule, &g1));

        assert!(matches!(
            schedule.delete_course(&is).unwrap_err(),
            ScheduleError::CourseNotFound { .. }
        ));
    }

    #[test]
    fn test_duplicate_gets_fresh_ids_same_content() {
        let mut schedule = Schedule::new("Dream Schedule");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");
        let g1 = schedule
            .add_section(&cs, new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap();
        schedule.toggle_section(&cs, &g1).unwrap();

        let copy = schedule.duplicate();
        assert_eq!(copy.name, "Dream Schedule (Copy)");
        assert_ne!(copy.id, schedule.id);
        assert_ne!(copy.courses[0].id, schedule.courses[0].id);
        assert_ne!(copy.courses[0].sections[0].id, schedule.courses[0].sections[0].id);

        let original = &schedule.courses[0].sections[0];
        let copied = &copy.courses[0].sections[0];
        assert_eq!(copied.start_time, original.start_time);
        assert_eq!(copied.is_selected, original.is_selected);
    }

    #[test]
    fn test_events_projection_and_stats() {
        let mut schedule = Schedule::new("Draft");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");
        let is = schedule.add_course("IS214", "Process Analysis", "#a855f7");
        let g1 = schedule
            .add_section(&cs, new_section(DayOfWeek::Monday, "08:15", "11:30"))
            .unwrap();
        let g2 = schedule
            .add_section(&is, new_section(DayOfWeek::Friday, "10:00", "12:00"))
            .unwrap();
        let px = schedule
            .add_section(&is, new_section(DayOfWeek::Friday, "", ""))
            .unwrap();
        schedule.toggle_section(&cs, &g1).unwrap();
        schedule.toggle_section(&is, &g2).unwrap();
        schedule.toggle_section(&is, &px).unwrap();

        let events = schedule.selected_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].course_code, "CS202");
        assert_eq!(events[0].color, "#3b82f6");

        let monday = schedule.events_for_day(DayOfWeek::Monday);
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].id, g1);

        let stats = schedule.stats();
        assert_eq!(stats.courses, 2);
        assert_eq!(stats.selected_sections, 3);
        assert_eq!(stats.conflicted_sections, 0);
        // 3h15m + 2h, the placeholder adds nothing
        assert_eq!(stats.weekly_minutes, 195 + 120);
    }

    #[test]
    fn test_update_course_fields() {
        let mut schedule = Schedule::new("Draft");
        let cs = schedule.add_course("CS202", "Algorithms", "#3b82f6");

        schedule
            .update_course(
                &cs,
                CourseUpdate {
                    course_name: Some("Design and Analysis of Algorithms".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            schedule.courses[0].course_name,
            "Design and Analysis of Algorithms"
        );
        assert_eq!(schedule.courses[0].course_code, "CS202");
    }
}
