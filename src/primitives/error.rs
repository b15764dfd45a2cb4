use std::io;
use std::path::{Path, PathBuf};

use derive_more::Display;
use snafu::Snafu;

use crate::ext::BestEffortPathExt;

#[cfg(unix)]
const EPERM: i32 = 1;

/// Machine-readable classification of a failed primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorCode {
    #[display("ENOENT")]
    NotFound,
    #[display("EEXIST")]
    AlreadyExists,
    #[display("ENOTDIR")]
    NotADirectory,
    #[display("EISDIR")]
    IsADirectory,
    #[display("ENOTEMPTY")]
    DirectoryNotEmpty,
    #[display("EACCES")]
    PermissionDenied,
    #[display("EPERM")]
    NotPermitted,
    #[display("EINVAL")]
    InvalidInput,
    #[display("ENOSYS")]
    Unsupported,
    #[display("EXDEV")]
    CrossesDevices,
    #[display("EROFS")]
    ReadOnlyFilesystem,
    #[display("UNKNOWN")]
    Unknown,
}

impl From<&io::Error> for ErrorCode {
    fn from(err: &io::Error) -> Self {
        #[cfg(unix)]
        if err.raw_os_error() == Some(EPERM) {
            return ErrorCode::NotPermitted;
        }

        match err.kind() {
            io::ErrorKind::NotFound => ErrorCode::NotFound,
            io::ErrorKind::AlreadyExists => ErrorCode::AlreadyExists,
            io::ErrorKind::NotADirectory => ErrorCode::NotADirectory,
            io::ErrorKind::IsADirectory => ErrorCode::IsADirectory,
            io::ErrorKind::DirectoryNotEmpty => ErrorCode::DirectoryNotEmpty,
            io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            io::ErrorKind::InvalidInput => ErrorCode::InvalidInput,
            io::ErrorKind::Unsupported => ErrorCode::Unsupported,
            io::ErrorKind::CrossesDevices => ErrorCode::CrossesDevices,
            io::ErrorKind::ReadOnlyFilesystem => ErrorCode::ReadOnlyFilesystem,
            _ => ErrorCode::Unknown,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FsError {
    #[snafu(display("{operation} failed on {} ({}): {source}", path.best_effort_path_display(), ErrorCode::from(source)))]
    Io {
        operation: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[snafu(display(
        "{operation} failed from {} to {} ({}): {source}",
        from.best_effort_path_display(),
        to.best_effort_path_display(),
        ErrorCode::from(source)
    ))]
    Link {
        operation: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[snafu(display("A file is in this path: {}", path.best_effort_path_display()))]
    OccupiedPath { path: PathBuf },
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDir { source: io::Error },
}

impl FsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FsError::Io { source, .. }
            | FsError::Link { source, .. }
            | FsError::CurrentDir { source } => ErrorCode::from(source),
            FsError::OccupiedPath { .. } => ErrorCode::NotADirectory,
        }
    }

    /// The path the failure is about; the source path for two-path operations.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsError::Io { path, .. } | FsError::OccupiedPath { path } => Some(path),
            FsError::Link { from, .. } => Some(from),
            FsError::CurrentDir { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::NotFound
    }
}
