use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Terminal for the NebulaOS virtual filesystem
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Directory holding `nebula.yaml` and the persisted filesystem
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Command line to run once, e.g. `ls /home/user`. Starts an interactive
    /// prompt when omitted.
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["nebula"]).expect("Failed to parse arguments");
        assert!(matches!(cli.log_level, LogLevel::Warn));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.command.is_empty());
    }

    #[test]
    fn test_trailing_command_keeps_flags() {
        let cli = Cli::try_parse_from(["nebula", "--root", "/tmp/state", "rm", "-rf", "old"])
            .expect("Failed to parse arguments");
        assert_eq!(cli.root, PathBuf::from("/tmp/state"));
        assert_eq!(cli.command, vec!["rm", "-rf", "old"]);
    }

    #[test]
    fn test_log_level_values() {
        let cli = Cli::try_parse_from(["nebula", "-l", "silent", "pwd"])
            .expect("Failed to parse arguments");
        assert!(cli.log_level.to_tracing_level().is_none());
        assert_eq!(cli.command, vec!["pwd"]);
    }
}
