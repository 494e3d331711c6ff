//! Conflict detection and propagation over a schedule's selected sections.
//!
//! Detection is a full recomputation every time: collect the selected
//! sections as week-linearized time blocks, compare each unordered pair
//! once, and re-derive every section's `has_conflict` flag from the
//! result. There is no incremental state to drift out of sync.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::time::week_minutes;
use crate::types::{Conflict, Schedule, Section, TimeBlock};

/// Converts a section into its week-linearized time block.
///
/// # Arguments
/// * `section` - The section to convert; callers pass selected sections
/// * `course_id` - Id of the course this section belongs to
///
/// # Returns
/// * `Ok(TimeBlock)` - Comparable interval tagged with the owning ids
/// * `Err(InvalidTimeFormat)` - Either time string is malformed
pub fn section_to_time_block(
    section: &Section,
    course_id: &str,
) -> Result<TimeBlock, ScheduleError> {
    Ok(TimeBlock {
        day: section.day,
        day_index: section.day.index(),
        start_minutes: week_minutes(section.day, &section.start_time)?,
        end_minutes: week_minutes(section.day, &section.end_time)?,
        course_id: course_id.to_string(),
        section_id: section.id.clone(),
    })
}

/// Checks whether two time blocks overlap.
///
/// Intervals are half-open: a block ending exactly when another starts is
/// touching, not overlapping, and never counts as a conflict.
pub fn blocks_overlap(block1: &TimeBlock, block2: &TimeBlock) -> bool {
    if block1.day != block2.day {
        return false;
    }

    block1.start_minutes < block2.end_minutes && block1.end_minutes > block2.start_minutes
}

/// Collects time blocks for every selected, scheduled section.
///
/// Unscheduled placeholder sections carry no times and are skipped:
/// they can never conflict and never get flagged. A selected
/// section with unparseable times can only exist if a consumer bypassed
/// validation; it is skipped with a warning rather than silently counted
/// as conflict-free.
fn selected_time_blocks(schedule: &Schedule) -> Vec<TimeBlock> {
    let mut blocks = Vec::new();
    for course in &schedule.courses {
        for section in course.sections.iter().filter(|s| s.is_selected) {
            if !section.is_scheduled() {
                continue;
            }
            match section_to_time_block(section, &course.id) {
                Ok(block) => blocks.push(block),
                Err(e) => warn!(
                    "Skipping section {} ({}) with unparseable time: {}",
                    section.id, section.section_id, e
                ),
            }
        }
    }
    blocks
}

/// Detects all pairwise overlaps among a schedule's selected sections.
///
/// Emits each unordered pair exactly once, in stable course-then-section
/// order. Total over any schedule: an empty selection yields an empty
/// result, never an error.
pub fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let blocks = selected_time_blocks(schedule);

    let mut conflicts = Vec::new();
    for i in 0..blocks.len() {
        for j in (i + 1)..blocks.len() {
            if blocks_overlap(&blocks[i], &blocks[j]) {
                conflicts.push(Conflict {
                    section_ids: vec![
                        blocks[i].section_id.clone(),
                        blocks[j].section_id.clone(),
                    ],
                    course_ids: vec![blocks[i].course_id.clone(), blocks[j].course_id.clone()],
                    time_block: blocks[i].clone(),
                });
            }
        }
    }

    debug!(
        "Detected {} conflict(s) among {} selected section(s) in schedule {}",
        conflicts.len(),
        blocks.len(),
        schedule.id
    );
    conflicts
}

/// Flattens conflicts into the set of section ids involved in any pair.
pub fn conflicting_section_ids(conflicts: &[Conflict]) -> HashSet<String> {
    conflicts
        .iter()
        .flat_map(|conflict| conflict.section_ids.iter().cloned())
        .collect()
}

/// Re-derives every section's `has_conflict` flag from scratch.
///
/// After this call the flag is true iff the section is selected and its
/// block overlaps at least one other selected section. Unselected
/// sections are always reset to false. Idempotent: calling twice without
/// an intervening mutation changes nothing.
pub fn recompute_flags(schedule: &mut Schedule) {
    let conflicting = conflicting_section_ids(&detect_conflicts(schedule));

    for course in &mut schedule.courses {
        for section in &mut course.sections {
            section.has_conflict = section.is_selected && conflicting.contains(&section.id);
        }
    }
}
