//! Terminal rendering for meetsync types.
//!
//! Extension traits adding colored output to meetsync-core types using
//! owo_colors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use meetsync_core::event::{Event, TimeOption};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for TimeOption {
    fn render(&self) -> String {
        format!(
            "{}  {}",
            format_date_label(self.date).bold(),
            format_time_range(self.start_time, self.end_time)
        )
    }
}

impl Render for Event {
    /// Summary card, as shown in event listings.
    fn render(&self) -> String {
        let counts = format!(
            "{} {} · {} {}",
            self.time_options.len(),
            pluralize("time option", self.time_options.len()),
            self.attendees.len(),
            pluralize("response", self.attendees.len()),
        );
        let created = format!("Created on {}", format_created_at(&self.created_at));

        format!(
            "{}\n   {}\n   {}  {}",
            self.title.bold(),
            counts,
            created.dimmed(),
            self.id.dimmed()
        )
    }
}

/// "Mon, Mar 17"
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "9:00 AM - 10:00 AM"
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", format_clock(start), format_clock(end))
}

fn format_clock(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "Mar 1, 2025", in local time
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&chrono::Local)
        .format("%b %-d, %Y")
        .to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
