use anyhow::Result;
use meetsync_core::identity::UserIdentity;
use meetsync_core::store::{EventStore, SlotStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(
    store: &EventStore<impl SlotStore>,
    identity: &UserIdentity<impl SlotStore>,
    all: bool,
) -> Result<()> {
    let events: Vec<_> = store
        .all_events()
        .into_iter()
        .filter(|event| all || identity.is_user_event(&event.id))
        .collect();

    if events.is_empty() {
        if all {
            println!("{}", "No events yet".dimmed());
        } else {
            println!("{}", "You haven't created or answered any events yet".dimmed());
            println!("Create one with: {}", "meetsync new".cyan());
        }
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event.render());
    }

    Ok(())
}
