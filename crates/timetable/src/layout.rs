//! Calendar layout engine: groups a day's overlapping events into
//! clusters and assigns side-by-side columns, plus the vertical position
//! math for the visible hour grid.

use crate::error::ScheduleError;
use crate::time::{time_to_minutes, week_minutes};
use crate::types::CalendarEvent;

/// Default visible grid range: 8:00 through 23:00.
pub const DEFAULT_GRID_START_HOUR: u32 = 8;
pub const DEFAULT_GRID_END_HOUR: u32 = 23;

/// Column assignment for one event within its day.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutAssignment {
    pub event: CalendarEvent,

    /// Zero-based column within the event's overlap cluster
    pub column: usize,

    /// Width divisor: every member of a cluster shares the same count
    pub total_columns: usize,
}

/// Vertical placement of an event, as percentages of the visible grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPosition {
    pub top: f32,
    pub height: f32,
}

/// Computes top/height percentages for an event by linear interpolation
/// within the grid's hour range. Events reaching outside the visible
/// range clip to the [0, 100] band.
///
/// `grid_end_hour` must be greater than `grid_start_hour`.
pub fn event_position(
    start_time: &str,
    end_time: &str,
    grid_start_hour: u32,
    grid_end_hour: u32,
) -> Result<EventPosition, ScheduleError> {
    debug_assert!(grid_end_hour > grid_start_hour);

    let start_minutes = time_to_minutes(start_time)? as f32;
    let end_minutes = time_to_minutes(end_time)? as f32;
    let grid_start_minutes = (grid_start_hour * 60) as f32;
    let grid_total_minutes = ((grid_end_hour - grid_start_hour) * 60) as f32;

    let top = (start_minutes - grid_start_minutes) / grid_total_minutes * 100.0;
    let height = (end_minutes - start_minutes) / grid_total_minutes * 100.0;

    let top = top.clamp(0.0, 100.0);
    let height = height.clamp(0.0, 100.0 - top);
    Ok(EventPosition { top, height })
}

/// Partitions one day's events into overlap clusters and assigns columns
/// so overlapping events render side by side.
///
/// Clusters are connected components under the half-open overlap
/// relation: chained events (A overlaps B, B overlaps C, A does not
/// overlap C) land in one cluster together. Within a cluster, columns
/// follow input order and every member's `total_columns` is the cluster
/// size; columns are never reused across non-overlapping subgroups of a
/// cluster, so the assignment is deterministic rather than maximally
/// compact.
///
/// Unscheduled placeholder events take no space on the grid and are
/// excluded from the result. Assignments come back in input order.
///
/// # Returns
/// * `Ok(assignments)` - One assignment per scheduled event
/// * `Err(InvalidTimeFormat)` - A scheduled event carries a malformed time
pub fn layout_day(events: &[CalendarEvent]) -> Result<Vec<LayoutAssignment>, ScheduleError> {
    // Parse intervals up front so clustering is pure integer comparison.
    // Day is carried in the week ordinate, so mixed-day input still lays
    // out correctly even though callers feed one day at a time.
    let mut scheduled: Vec<(usize, u32, u32)> = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        if !event.is_scheduled() {
            continue;
        }
        let start = week_minutes(event.day, &event.start_time)?;
        let end = week_minutes(event.day, &event.end_time)?;
        scheduled.push((index, start, end));
    }

    let overlaps = |a: &(usize, u32, u32), b: &(usize, u32, u32)| a.1 < b.2 && a.2 > b.1;

    // Grow each cluster to its transitive closure before starting the next
    let mut cluster_of = vec![usize::MAX; scheduled.len()];
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for seed in 0..scheduled.len() {
        if cluster_of[seed] != usize::MAX {
            continue;
        }

        let cluster_id = clusters.len();
        let mut members = vec![seed];
        cluster_of[seed] = cluster_id;

        let mut grew = true;
        while grew {
            grew = false;
            for candidate in 0..scheduled.len() {
                if cluster_of[candidate] != usize::MAX {
                    continue;
                }
                if members
                    .iter()
                    .any(|&member| overlaps(&scheduled[member], &scheduled[candidate]))
                {
                    cluster_of[candidate] = cluster_id;
                    members.push(candidate);
                    grew = true;
                }
            }
        }

        // Transitive absorption can pick members up out of input order;
        // columns are assigned by input order regardless
        members.sort_unstable();
        clusters.push(members);
    }

    let mut column_of = vec![0; scheduled.len()];
    for members in &clusters {
        for (column, &member) in members.iter().enumerate() {
            column_of[member] = column;
        }
    }

    let assignments = scheduled
        .iter()
        .enumerate()
        .map(|(slot, &(index, _, _))| LayoutAssignment {
            event: events[index].clone(),
            column: column_of[slot],
            total_columns: clusters[cluster_of[slot]].len(),
        })
        .collect();

    Ok(assignments)
}
