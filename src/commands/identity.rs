use anyhow::Result;
use meetsync_core::identity::UserIdentity;
use meetsync_core::store::SlotStore;
use owo_colors::OwoColorize;

pub fn whoami(identity: &UserIdentity<impl SlotStore>) -> Result<()> {
    println!("  User id:  {}", identity.user_id());
    match identity.user_name() {
        Some(name) => println!("  Name:     {}", name),
        None => println!("  Name:     {}", "(not set)".dimmed()),
    }
    println!("  Events:   {}", identity.user_events().len());
    Ok(())
}

pub fn set_name(identity: &mut UserIdentity<impl SlotStore>, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Please enter a name");
    }
    identity.set_user_name(name)?;
    println!("{}", format!("  You are now {}", name.trim()).green());
    Ok(())
}
