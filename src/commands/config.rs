use anyhow::Result;
use meetsync_core::config::MeetSyncConfig;
use owo_colors::OwoColorize;

pub fn run(config: &mut MeetSyncConfig, default_name: Option<String>) -> Result<()> {
    let config_path = MeetSyncConfig::config_path()?;

    if let Some(name) = default_name {
        let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
        MeetSyncConfig::save_default_name(&config_path, name.clone())?;
        config.default_name = name;
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!();
    println!("{}", "Settings".bold());
    match &config.default_name {
        Some(name) => println!("  Default name:  {}", name),
        None => println!("  Default name:  {}", "(not set)".dimmed()),
    }

    Ok(())
}
