use std::env;
use std::path::{Path, PathBuf};

use snafu::ResultExt;

use crate::path::normalize;
use crate::primitives::{CurrentDirSnafu, FsError};

/// Where relative paths are anchored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkingDir {
    /// Ask the OS on every resolution, so a `chdir` between calls is honored.
    #[default]
    Process,
    /// A fixed directory. A relative one is anchored at the process directory.
    Fixed(PathBuf),
}

impl WorkingDir {
    pub fn current(&self) -> Result<PathBuf, FsError> {
        match self {
            WorkingDir::Process => env::current_dir().context(CurrentDirSnafu),
            WorkingDir::Fixed(dir) if dir.is_absolute() => Ok(normalize(dir)),
            WorkingDir::Fixed(dir) => Ok(normalize(
                &env::current_dir().context(CurrentDirSnafu)?.join(dir),
            )),
        }
    }
}

impl From<Option<PathBuf>> for WorkingDir {
    fn from(dir: Option<PathBuf>) -> Self {
        dir.map_or(WorkingDir::Process, WorkingDir::Fixed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    working_dir: WorkingDir,
}

impl PathResolver {
    pub fn new(working_dir: WorkingDir) -> Self {
        Self { working_dir }
    }

    pub fn working_dir(&self) -> &WorkingDir {
        &self.working_dir
    }

    /// Normalizes `path` and anchors it at the working directory when it is
    /// relative. An empty path resolves to the working directory itself.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, FsError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return self.working_dir.current();
        }

        if path.is_absolute() {
            Ok(normalize(path))
        } else {
            Ok(normalize(&self.working_dir.current()?.join(path)))
        }
    }

    /// Like [`PathResolver::resolve`], treating a missing path as empty.
    pub fn resolve_optional<P: AsRef<Path>>(&self, path: Option<P>) -> Result<PathBuf, FsError> {
        match path {
            Some(path) => self.resolve(path),
            None => self.working_dir.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixed(dir: &Path) -> PathResolver {
        PathResolver::new(WorkingDir::Fixed(dir.to_path_buf()))
    }

    #[test]
    fn test_empty_path_resolves_to_working_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let resolver = fixed(temp_dir.path());

        assert_eq!(resolver.resolve("").unwrap(), temp_dir.path());
        assert_eq!(
            resolver.resolve_optional(None::<&Path>).unwrap(),
            temp_dir.path()
        );
    }

    #[test]
    fn test_relative_path_joins_working_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let resolver = fixed(temp_dir.path());

        let resolved = resolver.resolve("a/./b/../c").unwrap();

        assert_eq!(resolved, temp_dir.path().join("a").join("c"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_relative_path_may_climb_out_of_working_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested");
        let resolver = fixed(&nested);

        assert_eq!(
            resolver.resolve("../sibling").unwrap(),
            temp_dir.path().join("sibling")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_path_ignores_working_dir() {
        let resolver = fixed(Path::new("/somewhere/else"));

        assert_eq!(
            resolver.resolve("/tmp//x/../y").unwrap(),
            PathBuf::from("/tmp/y")
        );
    }

    #[test]
    fn test_process_working_dir_follows_current_dir() {
        let resolver = PathResolver::default();
        let expected = env::current_dir().unwrap().join("child");

        assert_eq!(resolver.resolve("child").unwrap(), expected);
    }

    #[test]
    fn test_same_input_follows_each_working_dir() {
        let first = TempDir::new().expect("Failed to create temp directory");
        let second = TempDir::new().expect("Failed to create temp directory");
        let working_dirs = [
            WorkingDir::Fixed(first.path().to_path_buf()),
            WorkingDir::Fixed(second.path().to_path_buf()),
            WorkingDir::Process,
        ];

        let resolved = working_dirs
            .into_iter()
            .map(|working_dir| PathResolver::new(working_dir).resolve("child").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            resolved,
            vec![
                first.path().join("child"),
                second.path().join("child"),
                env::current_dir().unwrap().join("child"),
            ]
        );
    }

    #[test]
    fn test_working_dir_from_optional_path() {
        assert_eq!(WorkingDir::from(None), WorkingDir::Process);
        assert_eq!(
            WorkingDir::from(Some(PathBuf::from("/x"))),
            WorkingDir::Fixed(PathBuf::from("/x"))
        );
    }
}
