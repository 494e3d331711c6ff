//! Time model: conversions between "HH:mm" wall-clock strings, minutes
//! from midnight, and week-linearized minutes.
//!
//! Linearizing a (day, time) pair into minutes from Monday 00:00 reduces
//! every overlap question to a single-axis interval comparison.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScheduleError;
use crate::types::DayOfWeek;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// 24-hour "HH:mm"; hour may be unpadded, minutes are always two digits.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap());

/// Checks a time string against the 24-hour "HH:mm" pattern.
pub fn is_valid_time_format(time: &str) -> bool {
    TIME_REGEX.is_match(time)
}

/// Converts a time string to minutes from midnight.
///
/// # Arguments
/// * `time` - Time string in "HH:mm" format (e.g., "14:30")
///
/// # Returns
/// * `Ok(minutes)` - Minutes from midnight (0-1439)
/// * `Err(InvalidTimeFormat)` - If the string does not match the pattern;
///   malformed input is never silently coerced
pub fn time_to_minutes(time: &str) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat {
        time: time.to_string(),
    };

    let caps = TIME_REGEX.captures(time).ok_or_else(invalid)?;
    let hours: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minutes: u32 = caps[2].parse().map_err(|_| invalid())?;
    Ok(hours * 60 + minutes)
}

/// Converts minutes from midnight back to a zero-padded "HH:mm" string.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Converts a day + time into minutes from the start of the week
/// (Monday 00:00). This is the ordinate the conflict detector compares.
pub fn week_minutes(day: DayOfWeek, time: &str) -> Result<u32, ScheduleError> {
    Ok(day.index() * MINUTES_PER_DAY + time_to_minutes(time)?)
}

/// Checks that both times are well-formed and end is strictly after start.
pub fn is_valid_time_range(start: &str, end: &str) -> bool {
    matches!(
        (time_to_minutes(start), time_to_minutes(end)),
        (Ok(s), Ok(e)) if e > s
    )
}

/// Validates a section's start/end pair at creation or edit time.
///
/// Both strings empty is allowed: that is the unscheduled-placeholder
/// form, which never reaches the conflict detector.
///
/// # Returns
/// * `Err(InvalidTimeFormat)` - Either string fails the "HH:mm" pattern
/// * `Err(InvalidTimeRange)` - End is not strictly after start
pub fn validate_section_times(start: &str, end: &str) -> Result<(), ScheduleError> {
    if start.is_empty() && end.is_empty() {
        return Ok(());
    }

    let start_minutes = time_to_minutes(start)?;
    let end_minutes = time_to_minutes(end)?;
    if end_minutes <= start_minutes {
        return Err(ScheduleError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Formats a 24-hour time for display (e.g., "14:30" -> "2:30 PM").
pub fn format_time_display(time: &str) -> Result<String, ScheduleError> {
    let total = time_to_minutes(time)?;
    let hours = total / 60;
    let minutes = total % 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{display_hours}:{minutes:02} {period}"))
}

/// Generates "HH:mm" labels for the calendar grid, inclusive of the end
/// hour (e.g., 8, 23, 60 yields "08:00" through "23:00").
pub fn generate_time_slots(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Vec<String> {
    let mut slots = Vec::new();
    if interval_minutes == 0 {
        return slots;
    }

    let mut current = start_hour * 60;
    let end = end_hour * 60;
    while current <= end {
        slots.push(minutes_to_time(current));
        current += interval_minutes;
    }
    slots
}
