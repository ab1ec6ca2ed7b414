use anyhow::Result;
use meetsync_core::event::Event;
use meetsync_core::store::{EventStore, SlotStore};
use owo_colors::OwoColorize;

use crate::render::{Render, format_created_at, pluralize};

pub fn run(store: &EventStore<impl SlotStore>, id: &str) -> Result<()> {
    let Some(event) = store.event_by_id(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    println!("{}", event.title.bold());
    if let Some(description) = &event.description {
        println!("{}", description.dimmed());
    }
    if let Some(location) = &event.location {
        println!("📍 {}", location);
    }
    println!(
        "{}",
        format!(
            "Created by {} on {}",
            event.created_by,
            format_created_at(&event.created_at)
        )
        .dimmed()
    );

    println!();
    println!("{}", "Time options".bold());
    let best: Vec<&str> = event
        .best_time_options()
        .iter()
        .map(|option| option.id.as_str())
        .collect();
    for (n, (option, votes)) in event.tally().into_iter().enumerate() {
        let marker = if best.contains(&option.id.as_str()) {
            "★".green().to_string()
        } else {
            " ".to_string()
        };
        let count = format!("{} {}", votes, pluralize("vote", votes));
        println!("  {} {}. {}  {}", marker, n + 1, option.render(), count.dimmed());

        let voters = event.voters_for(&option.id);
        if !voters.is_empty() {
            println!("        {}", voters.join(", ").dimmed());
        }
    }

    println!();
    print_best_times(&event);

    if !event.attendees.is_empty() {
        println!();
        println!("{}", format!("Responses ({})", event.attendees.len()).bold());
        for attendee in &event.attendees {
            match &attendee.comment {
                Some(comment) => println!("  {}: {}", attendee.name, comment.italic()),
                None => println!("  {}", attendee.name),
            }
        }
    }

    Ok(())
}

pub fn print_best_times(event: &Event) {
    let best = event.best_time_options();
    if best.is_empty() {
        println!("{}", "No responses yet".dimmed());
        return;
    }

    let label = if best.len() == 1 { "Best time" } else { "Best times" };
    println!("{}", label.bold());
    for option in best {
        let votes = event.vote_count(&option.id);
        let count = format!("{} of {} available", votes, event.attendees.len());
        println!("  {}  {}", option.render().green(), count.dimmed());
    }
}
