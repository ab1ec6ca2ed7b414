use anyhow::Result;
use dialoguer::{Input, MultiSelect};
use meetsync_core::event::Event;
use meetsync_core::identity::UserIdentity;
use meetsync_core::store::{EventStore, SlotStore};
use owo_colors::OwoColorize;

use super::show::print_best_times;
use crate::render::{format_date_label, format_time_range};

pub fn run(
    store: &EventStore<impl SlotStore>,
    identity: &mut UserIdentity<impl SlotStore>,
    id: &str,
    select: &[String],
    name: Option<String>,
    comment: Option<String>,
) -> Result<()> {
    let Some(event) = store.event_by_id(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    println!("{}", event.title.bold());

    // --- Selection ---
    let selected = if select.is_empty() {
        prompt_selection(&event)?
    } else {
        resolve_selection(&event, select)?
    };

    // --- Name ---
    let name = match name.or_else(|| identity.user_name().map(str::to_string)) {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Your name")
            .interact_text()?,
    };

    let Some(updated) = store.add_attendee(id, &name, &selected, comment)? else {
        anyhow::bail!("Event '{}' not found", id);
    };

    // Remember the name for next time
    if identity.user_name() != Some(name.trim()) {
        identity.set_user_name(&name)?;
    }
    identity.add_user_event(id)?;

    println!("{}", "  Response submitted".green());
    println!();
    print_best_times(&updated);

    Ok(())
}

/// Ask which options work, by ticking them off a list.
fn prompt_selection(event: &Event) -> Result<Vec<String>> {
    let labels: Vec<String> = event
        .time_options
        .iter()
        .map(|option| {
            format!(
                "{}  {}",
                format_date_label(option.date),
                format_time_range(option.start_time, option.end_time)
            )
        })
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("  Which times work for you? (space to select)")
        .items(&labels)
        .interact()?;

    Ok(chosen
        .into_iter()
        .map(|i| event.time_options[i].id.clone())
        .collect())
}

/// Map each argument to a time option id. Arguments are either 1-based
/// positions (as listed by `show`) or option ids.
fn resolve_selection(event: &Event, select: &[String]) -> Result<Vec<String>> {
    select
        .iter()
        .map(|arg| -> Result<String> {
            let arg = arg.trim();
            if let Some(option) = event.time_option(arg) {
                return Ok(option.id.clone());
            }
            match arg.parse::<usize>() {
                Ok(n) if n >= 1 && n <= event.time_options.len() => {
                    Ok(event.time_options[n - 1].id.clone())
                }
                _ => anyhow::bail!(
                    "No time option \"{}\". Use a number from 1 to {}",
                    arg,
                    event.time_options.len()
                ),
            }
        })
        .collect()
}
