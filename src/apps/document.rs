use tracing::debug;

use crate::filesystem::{Vfs, VfsError};
use crate::storage::KeyValueStore;

/// Text buffer bound to a file, as used by the notepad and the code editor.
///
/// Reads are best effort: if the file cannot be read the buffer keeps what it
/// already holds. Saving goes through `write_file`, so a missing file is
/// created as long as its directory exists.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    content: String,
    synced: Option<String>,
}

impl Document {
    pub fn open<S: KeyValueStore>(
        vfs: &Vfs<S>,
        path: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        let mut document = Self {
            path: path.into(),
            content: fallback.into(),
            synced: None,
        };
        document.reload(vfs);
        document
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Whether the buffer differs from what was last read or written.
    pub fn is_dirty(&self) -> bool {
        self.synced.as_deref() != Some(self.content.as_str())
    }

    /// Re-reads the file. Returns false and keeps the current buffer when the
    /// file cannot be read.
    pub fn reload<S: KeyValueStore>(&mut self, vfs: &Vfs<S>) -> bool {
        match vfs.read_file(&self.path) {
            Ok(content) => {
                self.synced = Some(content.clone());
                self.content = content;
                true
            }
            Err(e) => {
                debug!("Keeping buffer for '{}': {}", self.path, e);
                false
            }
        }
    }

    pub fn save<S: KeyValueStore>(&mut self, vfs: &mut Vfs<S>) -> Result<(), VfsError> {
        vfs.write_file(&self.path, self.content.clone())?;
        self.synced = Some(self.content.clone());
        Ok(())
    }
}
