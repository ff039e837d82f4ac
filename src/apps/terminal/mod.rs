mod command;
mod cwd;
mod terminal;

pub use command::Command;
pub use cwd::join;
pub use terminal::{CommandOutcome, Terminal};
