use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "zigzag")]
#[command(author, version, about)]
#[command(long_about = "Connect the numbered dots in order without grazing the others.\n\n\
    Press on dot 1 and drag through every dot in ascending order. Passing too\n\
    close to any other dot, landing on the wrong one, or letting go early sends\n\
    you back to level 1.\n\n\
    Examples:\n  \
    zigzag                       Play (fullscreen)\n  \
    zigzag --windowed            Play in a window\n  \
    zigzag layout --level 5      Print a random level-5 board\n  \
    zigzag progress show         Show current and best level")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a generated board as text
    Layout {
        /// Level to lay out (defaults to the saved level)
        #[arg(short, long)]
        level: Option<u32>,

        /// Seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Inspect or reset saved progress
    Progress {
        #[command(subcommand)]
        command: ProgressCommands,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ProgressCommands {
    /// Display current and best level
    Show,

    /// Start over from level 1 and forget the best level
    Reset,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.windowed, tuning.detection_radius)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "zigzag=warn",
            1 => "zigzag=debug",
            _ => "zigzag=trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Layout { level, seed }) => crate::commands::layout::run(level, seed),
            Some(Commands::Progress { command }) => crate::commands::progress::run(command),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => crate::app::run(self.windowed),
        }
    }
}
