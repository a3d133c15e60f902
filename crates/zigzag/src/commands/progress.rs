use anyhow::Result;
use colored::Colorize;

use crate::cli::ProgressCommands;
use crate::progress::Progress;

pub fn run(command: ProgressCommands) -> Result<()> {
    match command {
        ProgressCommands::Show => {
            let path = Progress::path()?;
            let progress = Progress::load_from(&path)?;
            println!("{}  {}", "Level:".bold(), progress.current_level);
            println!("{}   {}", "Best:".bold(), progress.best_level);
            println!("{}", format!("({})", path.display()).dimmed());
        }
        ProgressCommands::Reset => {
            let path = Progress::default().save()?;
            println!("{} Progress reset ({})", "✓".green(), path.display());
        }
    }
    Ok(())
}
