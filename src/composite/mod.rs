//! Recursive operations composed from the primitives.
//!
//! Each operation resolves its input path when it starts, and again at every
//! recursive step. Children of a directory are processed concurrently on the
//! calling task; the parent step only runs once all of them have finished.

mod mkdirp;
mod rm;
mod tree;

use std::path::{Path, PathBuf};

pub use tree::{FILE_MARKER, FileDescriber, FileMarker, SizeDescriber, TreeNode};

use crate::path::{PathResolver, WorkingDir};
use crate::primitives::FsError;

/// Entry point for the composite operations.
#[derive(Debug, Clone, Default)]
pub struct Pfs {
    resolver: PathResolver,
}

impl Pfs {
    /// Resolves relative paths against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `dir` instead of the process one.
    pub fn with_working_dir(dir: impl Into<PathBuf>) -> Self {
        Self::from(WorkingDir::Fixed(dir.into()))
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, FsError> {
        self.resolver.resolve(path)
    }
}

impl From<WorkingDir> for Pfs {
    fn from(working_dir: WorkingDir) -> Self {
        Self {
            resolver: PathResolver::new(working_dir),
        }
    }
}
