use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!("{} Set {key} = {value}", "✓".green());
            println!("{}", format!("Saved to {}", path.display()).dimmed());
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{}", "Configuration".bold());
    println!("{}", format!("({})", path.display()).dimmed());
    println!();

    let tuning = config.tracker_config();
    println!("  {:<28} {}", "defaults.windowed", config.windowed());
    println!(
        "  {:<28} {}",
        "tuning.intersection_threshold", tuning.intersection_threshold
    );
    println!(
        "  {:<28} {}",
        "tuning.warning_threshold", tuning.warning_threshold
    );
    println!("  {:<28} {}", "tuning.detection_radius", tuning.detection_radius);
    println!(
        "  {:<28} {}",
        "tuning.path_corridor_width",
        tuning
            .path_corridor_width
            .map_or_else(|| "off".to_string(), |w| w.to_string())
    );
    Ok(())
}
