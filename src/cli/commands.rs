//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

/// homework-bot - Telegram notifications for Practicum review status changes
#[derive(Parser, Debug)]
#[command(name = "homework-bot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["homework-bot"]).unwrap();
        assert!(!cli.is_verbose());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_config_and_verbose() {
        let cli = Cli::try_parse_from(["homework-bot", "-v", "--config", "/tmp/bot.yml"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bot.yml")));
    }

    #[test]
    fn test_cli_rejects_positional_args() {
        assert!(Cli::try_parse_from(["homework-bot", "run"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
