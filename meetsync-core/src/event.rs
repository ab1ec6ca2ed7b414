//! Scheduling poll types.
//!
//! An `Event` is an immutable catalog of candidate `TimeOption`s with an
//! append-only list of `Attendee` responses layered on top. Every operation
//! here is pure: transformations return a new value and never touch storage.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MeetSyncError, MeetSyncResult};
use crate::id::new_id;

/// A scheduling poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Display name of whoever created the poll
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Candidate times, in the order the creator declared them
    pub time_options: Vec<TimeOption>,
    /// Responses, in the order they were submitted
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

/// A candidate meeting time.
///
/// Start and end are floating (no timezone), as entered by the creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOption {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// A time option as supplied by the creator, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeOption {
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// One person's response to a poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub name: String,
    pub selected_time_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NewTimeOption {
    /// A time option on `date` running from `start` to `end` that same day.
    pub fn on(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        NewTimeOption {
            date,
            start_time: date.and_time(start),
            end_time: date.and_time(end),
        }
    }

    fn validate(&self, position: usize) -> MeetSyncResult<()> {
        if self.start_time >= self.end_time {
            return Err(MeetSyncError::Validation(format!(
                "Time option {} ends before it starts",
                position + 1
            )));
        }
        if self.start_time.date() != self.date {
            return Err(MeetSyncError::Validation(format!(
                "Time option {} starts on {} but is dated {}",
                position + 1,
                self.start_time.date(),
                self.date
            )));
        }
        Ok(())
    }

    fn with_id(self, id: String) -> TimeOption {
        TimeOption {
            id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl Attendee {
    pub fn has_selected(&self, time_option_id: &str) -> bool {
        self.selected_time_ids.iter().any(|id| id == time_option_id)
    }
}

impl Event {
    /// Build a new poll.
    ///
    /// Every time option gets a fresh id, `created_at` is stamped with the
    /// current time, and the attendee list starts empty. Fails with a
    /// validation error if the title is blank, no options are given, or an
    /// option's times are inconsistent.
    pub fn create(
        title: &str,
        description: Option<String>,
        location: Option<String>,
        created_by: &str,
        time_options: Vec<NewTimeOption>,
    ) -> MeetSyncResult<Event> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MeetSyncError::Validation(
                "Please provide an event title".into(),
            ));
        }
        if time_options.is_empty() {
            return Err(MeetSyncError::Validation(
                "Please add at least one time option".into(),
            ));
        }
        for (position, option) in time_options.iter().enumerate() {
            option.validate(position)?;
        }

        Ok(Event {
            id: new_id(),
            title: title.to_string(),
            description: non_blank(description),
            location: non_blank(location),
            created_by: created_by.trim().to_string(),
            created_at: Utc::now(),
            time_options: time_options
                .into_iter()
                .map(|option| option.with_id(new_id()))
                .collect(),
            attendees: Vec::new(),
        })
    }

    /// Return a copy of this event with one more response appended.
    ///
    /// The name must be non-blank and at least one option must be selected.
    /// Every selected id must belong to one of this event's time options;
    /// duplicates are collapsed keeping the first occurrence.
    pub fn add_attendee(
        &self,
        name: &str,
        selected_time_ids: &[String],
        comment: Option<String>,
    ) -> MeetSyncResult<Event> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MeetSyncError::Validation("Please enter your name".into()));
        }
        if selected_time_ids.is_empty() {
            return Err(MeetSyncError::Validation(
                "Please select at least one time option".into(),
            ));
        }

        let mut selected: Vec<String> = Vec::with_capacity(selected_time_ids.len());
        for id in selected_time_ids {
            if self.time_option(id).is_none() {
                return Err(MeetSyncError::Validation(format!(
                    "'{}' is not a time option of this event",
                    id
                )));
            }
            if !selected.contains(id) {
                selected.push(id.clone());
            }
        }

        let mut event = self.clone();
        event.attendees.push(Attendee {
            id: new_id(),
            name: name.to_string(),
            selected_time_ids: selected,
            comment: non_blank(comment),
        });
        Ok(event)
    }

    pub fn time_option(&self, id: &str) -> Option<&TimeOption> {
        self.time_options.iter().find(|option| option.id == id)
    }

    /// Number of attendees who selected the given option.
    pub fn vote_count(&self, time_option_id: &str) -> usize {
        self.attendees
            .iter()
            .filter(|attendee| attendee.has_selected(time_option_id))
            .count()
    }

    /// Names of the attendees who selected the given option, in response order.
    pub fn voters_for(&self, time_option_id: &str) -> Vec<&str> {
        self.attendees
            .iter()
            .filter(|attendee| attendee.has_selected(time_option_id))
            .map(|attendee| attendee.name.as_str())
            .collect()
    }

    /// Every time option paired with its vote count, in declaration order.
    pub fn tally(&self) -> Vec<(&TimeOption, usize)> {
        self.time_options
            .iter()
            .map(|option| (option, self.vote_count(&option.id)))
            .collect()
    }

    /// The time options with the most votes.
    ///
    /// Ties keep their declaration order. Empty when nobody has responded or
    /// no option has a single vote.
    pub fn best_time_options(&self) -> Vec<&TimeOption> {
        let tally = self.tally();
        let max = tally.iter().map(|(_, votes)| *votes).max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }

        tally
            .into_iter()
            .filter(|(_, votes)| *votes == max)
            .map(|(option, _)| option)
            .collect()
    }
}

/// Treat blank optional text as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
