//! Consumers of the filesystem: the terminal shell, the text document
//! buffer behind the notepad and code editor, and the browser's address bar.

mod browser;
mod document;
pub mod terminal;

pub use browser::{Browser, HOME_PAGE, Page};
pub use document::Document;
pub use terminal::{CommandOutcome, Terminal};
