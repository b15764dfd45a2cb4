use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::path::normalize;

/// Renders a path for logs and error messages without touching the
/// filesystem, since the path being reported may well not exist.
pub fn best_effort_path_display(path: &Path) -> String {
    let normalized = normalize(path);
    if normalized.as_os_str().is_empty() {
        return ".".to_string();
    }
    normalized.display().to_string()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

/// Directory entry names as map keys and terminal output.
pub trait LossyNameExt {
    fn lossy_name(&self) -> String;
}

impl LossyNameExt for OsStr {
    fn lossy_name(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    #[cfg(unix)]
    fn test_display_is_normalized() {
        assert_eq!(Path::new("/a/./b/../c").best_effort_path_display(), "/a/c");
    }

    #[test]
    fn test_display_of_collapsed_path() {
        assert_eq!(PathBuf::from("a/..").best_effort_path_display(), ".");
    }

    #[test]
    fn test_lossy_name() {
        assert_eq!(OsString::from("entry.txt").lossy_name(), "entry.txt");
    }
}
