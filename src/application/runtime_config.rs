use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    /// Words of a one-shot command; empty for the interactive prompt
    pub command: Vec<String>,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            command: cli.command,
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}
