use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, ensure};
use tracing::debug;

use super::key_value::{InvalidKeySnafu, KeyValueStore, ReadSnafu, StoreError, WriteSnafu};

const VALUE_EXTENSION: &str = "json";

/// Directory-backed store. Each key is kept in its own `<key>.json` file.
///
/// Values are written to a sibling temp file and renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        ensure!(is_valid_key(key), InvalidKeySnafu { key });
        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

/// Whether `key` can name a value file: non-empty, ASCII alphanumerics plus
/// `-`, `_` and `.`, and no leading `.`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.value_path(key)?;
        debug!("Reading '{}' from {}", key, path.display());
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(ReadSnafu { path }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.value_path(key)?;
        fs::create_dir_all(&self.dir).context(WriteSnafu {
            path: self.dir.clone(),
        })?;

        let staging = path.with_extension(format!("{VALUE_EXTENSION}.tmp"));
        fs::write(&staging, value).context(WriteSnafu {
            path: staging.clone(),
        })?;
        fs::rename(&staging, &path).context(WriteSnafu { path: path.clone() })?;

        debug!("Wrote '{}' to {}", key, path.display());
        Ok(())
    }
}
