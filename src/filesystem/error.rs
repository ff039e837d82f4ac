use snafu::Snafu;

use crate::filesystem::snapshot::SnapshotError;
use crate::storage::StoreError;

/// Failures reported by [`Vfs`](super::Vfs) operations.
///
/// Apart from `EncodeError` and `PersistError`, every variant is a logical error in the
/// request: nothing here is transient and nothing is retried.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VfsError {
    #[snafu(display("Already exists: {}", path))]
    AlreadyExists { path: String },
    #[snafu(display("Invalid path: {}", path))]
    InvalidPath { path: String },
    #[snafu(display("Not a file: {}", path))]
    NotAFile { path: String },
    #[snafu(display("Path is a directory: {}", path))]
    PathIsDirectory { path: String },
    #[snafu(display("No such directory: {}", path))]
    NoSuchDirectory { path: String },
    #[snafu(display("No such file or directory: {}", path))]
    NotFound { path: String },
    #[snafu(display("Not a directory: {}", path))]
    NotADirectory { path: String },
    #[snafu(display("Path is nested deeper than {} levels: {}", limit, path))]
    TooDeep { path: String, limit: usize },
    #[snafu(display("Failed to serialize the filesystem"))]
    EncodeError { source: SnapshotError },
    #[snafu(display("Failed to persist the filesystem under key '{}'", key))]
    PersistError { key: String, source: StoreError },
}
