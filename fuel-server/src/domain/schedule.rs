//! Weekly opening-hours parsing and arrival evaluation.
//!
//! The Spanish fuel-price feed publishes opening hours as free text like
//! `"L-V 08:00-22:00; S 09:00-14:00"`. Day letters run D,L,M,X,J,V,S
//! (Sunday through Saturday), day ranges may wrap past Saturday back to
//! Sunday, and anything the grammar does not cover degrades to `Unknown`
//! rather than an error.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, Timelike};

use super::open_status::OpenStatus;

/// A half-open `[start, end)` interval, in minutes since midnight.
///
/// `start < end` always holds: overnight and zero-length ranges are
/// rejected at parse time, never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: u16,
    pub end: u16,
}

impl TimeInterval {
    /// True if `minute` falls within `[start, end)`.
    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start && minute < self.end
    }
}

/// A parsed weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSchedule {
    /// Open around the clock.
    Always,
    /// Absent or unparseable opening hours.
    Unknown,
    /// Per-weekday interval lists, keyed 0 = Sunday .. 6 = Saturday.
    ///
    /// A missing day means closed that day. Multiple intervals on one day
    /// are a union: open inside any of them, closed between them.
    Weekly(HashMap<u8, Vec<TimeInterval>>),
}

impl ParsedSchedule {
    /// Open status at the given local instant.
    ///
    /// `Always` is open at any instant and `Unknown` stays unknown. A
    /// weekly schedule is checked against the instant's weekday
    /// (0 = Sunday) and minute of day with a half-open `[start, end)`
    /// test; a weekday with no recorded interval is closed.
    pub fn status_at(&self, instant: DateTime<Local>) -> OpenStatus {
        match self {
            ParsedSchedule::Always => OpenStatus::Open,
            ParsedSchedule::Unknown => OpenStatus::Unknown,
            ParsedSchedule::Weekly(intervals) => {
                let weekday = instant.weekday().num_days_from_sunday() as u8;
                let minute = (instant.hour() * 60 + instant.minute()) as u16;

                match intervals.get(&weekday) {
                    Some(day) if day.iter().any(|i| i.contains(minute)) => OpenStatus::Open,
                    _ => OpenStatus::Closed,
                }
            }
        }
    }
}

/// Parse a raw opening-hours string.
///
/// The grammar, case-insensitive:
/// - a 24-hour form (`24H`, `24 horas`, `abierto 24 horas`) parses as
///   [`ParsedSchedule::Always`];
/// - otherwise, `;`-separated clauses of a day part and a time range, e.g.
///   `"L-V 08:00-22:00"`. Clauses are additive across the week. A clause
///   whose day part or time range is invalid is dropped silently;
/// - absent or blank input, or input where no clause survives, parses as
///   [`ParsedSchedule::Unknown`].
pub fn parse_opening_hours(raw: Option<&str>) -> ParsedSchedule {
    let Some(raw) = raw else {
        return ParsedSchedule::Unknown;
    };

    let normalized = raw.trim().to_uppercase();
    if normalized.is_empty() {
        return ParsedSchedule::Unknown;
    }

    if is_round_the_clock(&normalized) {
        return ParsedSchedule::Always;
    }

    let mut intervals: HashMap<u8, Vec<TimeInterval>> = HashMap::new();

    for clause in normalized.split(';') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        let Some((days, range)) = parse_clause(clause) else {
            continue;
        };
        for day in days {
            intervals.entry(day).or_default().push(range);
        }
    }

    if intervals.is_empty() {
        ParsedSchedule::Unknown
    } else {
        ParsedSchedule::Weekly(intervals)
    }
}

/// 24-hour forms: `24H`, `24 HORAS`, `ABIERTO 24 HORAS`, any spacing.
fn is_round_the_clock(normalized: &str) -> bool {
    let squeezed: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    squeezed.contains("24H")
}

/// Split a clause like `"L-V 08:00-22:00"` into weekday indices and a
/// time interval. Returns `None` when either half is invalid.
fn parse_clause(clause: &str) -> Option<(Vec<u8>, TimeInterval)> {
    let split_at = clause.find(|c: char| c.is_ascii_digit())?;
    let (day_part, time_part) = clause.split_at(split_at);

    let days = parse_day_range(day_part)?;
    let range = parse_time_range(time_part)?;

    Some((days, range))
}

/// Parse a day token, a hyphenated range, or the words `LUNES A DOMINGO`.
///
/// Ranges walk forward circularly (wrapping past Saturday to Sunday), so
/// `"V-L"` covers Fri,Sat,Sun,Mon and `"L-D"` covers all seven days. The
/// walk is capped at 7 steps.
fn parse_day_range(day_part: &str) -> Option<Vec<u8>> {
    let squeezed: String = day_part.chars().filter(|c| !c.is_whitespace()).collect();

    if squeezed == "LUNESADOMINGO" {
        return Some((0..7).collect());
    }

    if let Some(day) = single_day(&squeezed) {
        return Some(vec![day]);
    }

    let mut parts = squeezed.split('-');
    let (start, end) = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => (single_day(start)?, single_day(end)?),
        _ => return None,
    };

    let mut days = Vec::new();
    let mut current = start;
    for _ in 0..7 {
        days.push(current);
        if current == end {
            return Some(days);
        }
        current = (current + 1) % 7;
    }

    // A walk that never reached its end day; cannot happen with two valid
    // tokens, but the cap keeps malformed input from looping.
    None
}

/// A single weekday token. Feed order: D,L,M,X,J,V,S = Sunday..Saturday.
fn single_day(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    let day = match (chars.next()?, chars.next()) {
        (c, None) => c,
        _ => return None,
    };

    match day {
        'D' => Some(0),
        'L' => Some(1),
        'M' => Some(2),
        'X' => Some(3),
        'J' => Some(4),
        'V' => Some(5),
        'S' => Some(6),
        _ => None,
    }
}

/// Parse `"HH:MM-HH:MM"` (1-2 digit fields, optional spaces around the
/// hyphen). Zero-length and overnight ranges are rejected.
fn parse_time_range(time_part: &str) -> Option<TimeInterval> {
    let mut parts = time_part.split('-');
    let (start, end) = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => (start, end),
        _ => return None,
    };

    let start = parse_minute_of_day(start.trim())?;
    let end = parse_minute_of_day(end.trim())?;

    if end <= start {
        return None;
    }

    Some(TimeInterval { start, end })
}

/// Parse `"HH:MM"` into minutes since midnight.
fn parse_minute_of_day(text: &str) -> Option<u16> {
    let (hours, minutes) = text.split_once(':')?;
    let hours = parse_field(hours)?;
    let minutes = parse_field(minutes)?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// A 1-2 digit numeric field.
fn parse_field(text: &str) -> Option<u16> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
