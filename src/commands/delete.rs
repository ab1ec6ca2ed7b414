use anyhow::Result;
use meetsync_core::store::{EventStore, SlotStore};
use owo_colors::OwoColorize;

pub fn run(store: &EventStore<impl SlotStore>, id: &str) -> Result<()> {
    if !store.delete_event(id)? {
        anyhow::bail!("Event '{}' not found", id);
    }

    println!("{}", "  Event deleted".green());
    Ok(())
}
