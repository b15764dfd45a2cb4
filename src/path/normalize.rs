use std::path::{Component, Path, PathBuf};

/// Lexically collapses `.` and `..` segments and redundant separators.
///
/// No filesystem access happens here, so symlinks are not resolved. A `..`
/// directly below the root is dropped, while a relative path that climbs
/// above its own start keeps its leading `..` segments.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    components.push(component);
                }
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[cfg(unix)]
    #[rstest]
    #[case("/a/b/../c", "/a/c")]
    #[case("/a/./b/./c", "/a/b/c")]
    #[case("/a//b///c/", "/a/b/c")]
    #[case("/..", "/")]
    #[case("/../../a", "/a")]
    #[case("/", "/")]
    #[case("a/b/..", "a")]
    #[case("../a/../b", "../b")]
    #[case("./a", "a")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn test_normalize_collapses_to_empty() {
        assert_eq!(normalize(Path::new("a/..")), PathBuf::new());
    }
}
