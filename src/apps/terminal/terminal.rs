use colored::Colorize;
use tracing::debug;

use crate::apps::terminal::command::Command;
use crate::apps::terminal::cwd::join;
use crate::filesystem::path::normalize;
use crate::filesystem::{DirEntry, EntryKind, Vfs, VfsError};
use crate::storage::KeyValueStore;

const HELP: &str = "Commands: help, ls, cd, pwd, cat, echo, touch, mkdir, rm, clear, sudo, exit";
const SUDO_REPLY: &str = "Password: ******\nAccess Denied… just kidding 😄";
const NO_SUCH_ENTRY: &str = "No such file or directory";
const NOT_A_DIRECTORY: &str = "Not a directory";
const NOT_A_FILE: &str = "Not a file";

/// What the host should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the text (possibly empty) as regular output.
    Output(String),
    /// Print the text as an error message.
    Failed(String),
    Silent,
    Clear,
    Exit,
}

/// Shell over a [`Vfs`]. It owns nothing but its working directory; the
/// filesystem is passed in for each command.
#[derive(Debug, Clone)]
pub struct Terminal {
    cwd: String,
    home: String,
    prompt: String,
    color: bool,
}

impl Terminal {
    pub fn new(home: impl Into<String>, prompt: impl Into<String>) -> Self {
        let home = normalize(&home.into());
        Self {
            cwd: home.clone(),
            home,
            prompt: prompt.into(),
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn prompt(&self) -> String {
        format!("{}:{}$ ", self.prompt, self.cwd)
    }

    pub fn execute<S: KeyValueStore>(&mut self, vfs: &mut Vfs<S>, line: &str) -> CommandOutcome {
        let command = Command::parse(line);
        debug!("Executing {:?} in '{}'", command, self.cwd);

        match command {
            Command::Empty => CommandOutcome::Silent,
            Command::Help => CommandOutcome::Output(HELP.to_string()),
            Command::Ls(path) => {
                let target = path.map_or_else(|| self.cwd.clone(), |p| self.resolve(&p));
                match vfs.read_dir(&target) {
                    Ok(entries) => CommandOutcome::Output(self.format_listing(&entries)),
                    Err(VfsError::NotADirectory { .. }) => {
                        CommandOutcome::Failed(NOT_A_DIRECTORY.to_string())
                    }
                    Err(_) => CommandOutcome::Failed(NO_SUCH_ENTRY.to_string()),
                }
            }
            Command::Cd(path) => {
                let target = path.map_or_else(|| self.home.clone(), |p| self.resolve(&p));
                match vfs.read_dir(&target) {
                    Ok(_) => {
                        self.cwd = normalize(&target);
                        CommandOutcome::Silent
                    }
                    Err(VfsError::NotADirectory { .. }) => {
                        CommandOutcome::Failed(NOT_A_DIRECTORY.to_string())
                    }
                    Err(_) => CommandOutcome::Failed(NO_SUCH_ENTRY.to_string()),
                }
            }
            Command::Pwd => CommandOutcome::Output(self.cwd.clone()),
            Command::Cat(path) => match vfs.read_file(&self.resolve(&path)) {
                Ok(content) => CommandOutcome::Output(content),
                Err(_) => CommandOutcome::Failed(NOT_A_FILE.to_string()),
            },
            Command::Echo {
                text,
                redirect: None,
            } => CommandOutcome::Output(text),
            Command::Echo {
                text,
                redirect: Some(file),
            } => Self::report(vfs.write_file(&self.resolve(&file), text)),
            Command::Touch(path) => Self::report(vfs.touch(&self.resolve(&path))),
            Command::Mkdir(path) => Self::report(vfs.mkdir(&self.resolve(&path))),
            Command::Rm(path) => Self::report(vfs.rm(&self.resolve(&path))),
            Command::Clear => CommandOutcome::Clear,
            Command::Sudo => CommandOutcome::Output(SUDO_REPLY.to_string()),
            Command::Exit => CommandOutcome::Exit,
            Command::Unknown(name) => CommandOutcome::Failed(format!("Command not found: {name}")),
        }
    }

    fn resolve(&self, path: &str) -> String {
        join(&self.cwd, path)
    }

    fn report(result: Result<(), VfsError>) -> CommandOutcome {
        match result {
            Ok(()) => CommandOutcome::Silent,
            Err(e) => CommandOutcome::Failed(format!("Error: {e}")),
        }
    }

    fn format_listing(&self, entries: &[DirEntry]) -> String {
        entries
            .iter()
            .map(|entry| match entry.kind {
                EntryKind::Dir if self.color => format!("{}/", entry.name).blue().bold().to_string(),
                EntryKind::Dir => format!("{}/", entry.name),
                EntryKind::File => entry.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
