use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use dialoguer::Input;
use meetsync_core::config::MeetSyncConfig;
use meetsync_core::event::NewTimeOption;
use meetsync_core::identity::UserIdentity;
use meetsync_core::store::{EventStore, SlotStore};
use owo_colors::OwoColorize;

use super::ANONYMOUS;
use crate::render::Render;

/// Options without an explicit end run this long unless `--duration` says otherwise.
const DEFAULT_DURATION_MINUTES: i64 = 60;

pub struct NewEventArgs {
    pub title: Option<String>,
    pub options: Vec<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

pub fn run(
    store: &EventStore<impl SlotStore>,
    identity: &mut UserIdentity<impl SlotStore>,
    config: &MeetSyncConfig,
    args: NewEventArgs,
) -> Result<()> {
    let interactive = args.title.is_none() || args.options.is_empty();

    let duration = match &args.duration {
        Some(input) => parse_duration(input)?,
        None => TimeDelta::minutes(DEFAULT_DURATION_MINUTES),
    };

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Time options ---
    let time_options = if args.options.is_empty() {
        prompt_time_options(duration)?
    } else {
        args.options
            .iter()
            .map(|input| parse_time_option(input, duration))
            .collect::<Result<Vec<_>>>()?
    };

    let created_by = identity
        .user_name()
        .map(str::to_string)
        .or_else(|| config.default_name.clone())
        .unwrap_or_else(|| ANONYMOUS.to_string());

    let event = store.create_event(
        &title,
        args.description,
        args.location,
        &created_by,
        time_options,
    )?;
    identity.add_user_event(&event.id)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", event.title).green());
    for option in &event.time_options {
        println!("   {}", option.render());
    }
    println!();
    println!("  Share it: {}", format!("meetsync respond {}", event.id).cyan());

    Ok(())
}

/// Keep asking for time options until an empty line.
fn prompt_time_options(duration: TimeDelta) -> Result<Vec<NewTimeOption>> {
    let mut options = Vec::new();
    loop {
        let prompt = if options.is_empty() {
            "  When? (YYYY-MM-DD HH:MM-HH:MM)".to_string()
        } else {
            format!("  Another option? ({} so far, enter to finish)", options.len())
        };
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        if input.trim().is_empty() {
            if options.is_empty() {
                eprintln!("  {}", "You need at least one time option".red());
                continue;
            }
            return Ok(options);
        }

        match parse_time_option(&input, duration) {
            Ok(option) => options.push(option),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Parse "YYYY-MM-DD HH:MM-HH:MM", or "YYYY-MM-DD HH:MM" with the end
/// `duration` after the start.
fn parse_time_option(input: &str, duration: TimeDelta) -> Result<NewTimeOption> {
    let (date_part, time_part) = input
        .trim()
        .split_once(char::is_whitespace)
        .with_context(|| {
            format!(
                "Could not parse time option \"{}\". Expected YYYY-MM-DD HH:MM-HH:MM",
                input
            )
        })?;

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .with_context(|| format!("Invalid date \"{}\". Expected YYYY-MM-DD", date_part))?;

    let time_part = time_part.trim();
    let (start, end) = match time_part.split_once('-') {
        Some((start, end)) => (parse_clock(start)?, Some(parse_clock(end)?)),
        None => (parse_clock(time_part)?, None),
    };

    let start_time = date.and_time(start);
    let end_time = match end {
        Some(end) => date.and_time(end),
        None => start_time
            .checked_add_signed(duration)
            .context("Duration too large")?,
    };

    Ok(NewTimeOption {
        date,
        start_time,
        end_time,
    })
}

fn parse_clock(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .with_context(|| format!("Invalid time \"{}\". Expected HH:MM", input.trim()))
}

fn parse_duration(input: &str) -> Result<TimeDelta> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    TimeDelta::from_std(std_dur).context("Duration too large")
}
