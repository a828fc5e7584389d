//! Date labels and the upcoming/past split for events.

use chrono::{Datelike, NaiveDate};

/// Human date label for a single day or a range.
///
/// ```text
/// May 4, 2024
/// May 4–6, 2024
/// Apr 30 – May 2, 2024
/// Dec 30, 2024 – Jan 2, 2025
/// ```
pub fn date_label(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end = match end {
        Some(end) if end > start => end,
        _ => return start.format("%b %-d, %Y").to_string(),
    };

    if start.year() != end.year() {
        format!(
            "{} – {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )
    } else if start.month() != end.month() {
        format!(
            "{} – {}, {}",
            start.format("%b %-d"),
            end.format("%b %-d"),
            start.year()
        )
    } else {
        format!(
            "{}–{}, {}",
            start.format("%b %-d"),
            end.day(),
            start.year()
        )
    }
}

/// An event is upcoming until its last day has passed.
///
/// Undated events count as upcoming: they are announced but not scheduled.
pub fn is_upcoming(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> bool {
    match (start, end) {
        (_, Some(end)) => end >= today,
        (Some(start), None) => start >= today,
        (None, None) => true,
    }
}
