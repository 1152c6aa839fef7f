use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "weatherpush",
    version,
    about = "Push today's weather forecast to LINE"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml (defaults to config/config.yaml, then the environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the message instead of pushing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commands {
    /// JMA forecast: weather, precipitation probability and temperature (default)
    #[default]
    Jma,
    /// Yahoo! JAPAN rainfall observation and forecast for coordinates
    Yahoo,
}

impl Cli {
    pub fn selected_command(&self) -> Commands {
        self.command.unwrap_or_default()
    }

    /// Filter used when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_jma_and_push() {
        let cli = Cli::parse_from(["weatherpush"]);
        assert_eq!(cli.selected_command(), Commands::Jma);
        assert!(!cli.dry_run);
        assert_eq!(cli.default_log_filter(), "warn");
    }

    #[test]
    fn parses_yahoo_dry_run_verbose() {
        let cli = Cli::parse_from(["weatherpush", "yahoo", "--dry-run", "-vv"]);
        assert_eq!(cli.selected_command(), Commands::Yahoo);
        assert!(cli.dry_run);
        assert_eq!(cli.default_log_filter(), "trace");
    }

    #[test]
    fn parses_config_path() {
        let cli = Cli::parse_from(["weatherpush", "-c", "/etc/weatherpush.yaml", "jma"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/weatherpush.yaml")));
        assert_eq!(cli.selected_command(), Commands::Jma);
    }
}
