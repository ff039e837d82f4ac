use std::io::{self, BufRead, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::apps::{CommandOutcome, Terminal};
use crate::config::{Settings, SettingsError};
use crate::filesystem::{LoadOutcome, Vfs};
use crate::storage::{FileStore, KeyValueStore};

/// Directory under the root holding the persisted filesystem
const STATE_DIR_NAME: &str = ".nebula";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionReport {
    pub commands: usize,
    pub failures: usize,
}

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<SessionReport, ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let settings = Settings::read(&app_config.root).context(SettingsSnafu)?;
        debug!("Loaded settings: {:?}", settings);

        let store = FileStore::new(app_config.root.join(STATE_DIR_NAME));
        let (mut vfs, outcome) = Vfs::load(store, settings.storage_key.as_str());
        if let LoadOutcome::Recovered { .. } = outcome {
            warn!("Started from the default tree: {}", outcome);
        }

        let mut terminal =
            Terminal::new(settings.home.as_str(), settings.prompt.as_str()).with_color(app_config.color);

        let stdout = io::stdout();
        let stderr = io::stderr();
        let report = if app_config.command.is_empty() {
            Self::interactive(
                &mut terminal,
                &mut vfs,
                io::stdin().lock(),
                &mut stdout.lock(),
                &mut stderr.lock(),
            )?
        } else {
            let line = app_config.command.join(" ");
            Self::one_shot(
                &mut terminal,
                &mut vfs,
                &line,
                &mut stdout.lock(),
                &mut stderr.lock(),
            )?
        };

        info!(
            "Session finished: {} commands, {} failed",
            report.commands, report.failures
        );
        Ok(report)
    }

    /// Runs a single command line.
    pub fn one_shot<S: KeyValueStore>(
        terminal: &mut Terminal,
        vfs: &mut Vfs<S>,
        line: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<SessionReport, ApplicationError> {
        let mut report = SessionReport::default();
        Self::execute_line(terminal, vfs, line, out, err, &mut report)?;
        Ok(report)
    }

    /// Prompts for and runs commands until `exit` or the end of input.
    pub fn interactive<S: KeyValueStore>(
        terminal: &mut Terminal,
        vfs: &mut Vfs<S>,
        mut input: impl BufRead,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<SessionReport, ApplicationError> {
        let mut report = SessionReport::default();
        let mut line = String::new();

        loop {
            write!(out, "{}", terminal.prompt()).context(ConsoleSnafu)?;
            out.flush().context(ConsoleSnafu)?;

            line.clear();
            if input.read_line(&mut line).context(ConsoleSnafu)? == 0 {
                writeln!(out).context(ConsoleSnafu)?;
                break;
            }

            if !Self::execute_line(terminal, vfs, &line, out, err, &mut report)? {
                break;
            }
        }

        Ok(report)
    }

    /// Returns false once the session should end.
    fn execute_line<S: KeyValueStore>(
        terminal: &mut Terminal,
        vfs: &mut Vfs<S>,
        line: &str,
        out: &mut impl Write,
        err: &mut impl Write,
        report: &mut SessionReport,
    ) -> Result<bool, ApplicationError> {
        if line.trim().is_empty() {
            return Ok(true);
        }
        report.commands += 1;

        match terminal.execute(vfs, line) {
            CommandOutcome::Output(text) => writeln!(out, "{text}").context(ConsoleSnafu)?,
            CommandOutcome::Failed(text) => {
                report.failures += 1;
                writeln!(err, "{text}").context(ConsoleSnafu)?;
            }
            CommandOutcome::Clear => write!(out, "{CLEAR_SCREEN}").context(ConsoleSnafu)?,
            CommandOutcome::Silent => {}
            CommandOutcome::Exit => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading settings"))]
    SettingsError { source: SettingsError },
    #[snafu(display("Failed to talk to the console"))]
    ConsoleError { source: io::Error },
}
