use std::ffi::OsString;
use std::fs::{self as std_fs, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compio::fs;
use filetime::FileTime;
use snafu::ResultExt;
use tracing::trace;

use crate::ext::BestEffortPathExt;
use crate::primitives::blocking::blocking_at;
#[cfg(windows)]
use crate::primitives::blocking::run_blocking;
use crate::primitives::{FsError, IoSnafu, LinkSnafu, Stat, SymlinkKind};

pub async fn stat(path: impl AsRef<Path>) -> Result<Stat, FsError> {
    let path = path.as_ref();
    trace!("stat {}", path.best_effort_path_display());
    fs::metadata(path)
        .await
        .map(Stat::from)
        .context(IoSnafu {
            operation: "stat",
            path,
        })
}

/// Like [`stat`], but reports on a symlink itself rather than its target.
pub async fn lstat(path: impl AsRef<Path>) -> Result<Stat, FsError> {
    let path = path.as_ref();
    fs::symlink_metadata(path)
        .await
        .map(Stat::from)
        .context(IoSnafu {
            operation: "lstat",
            path,
        })
}

pub async fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<(), FsError> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::rename(from, to).await.context(LinkSnafu {
        operation: "rename",
        from,
        to,
    })
}

/// Creates a hard link `new` pointing at `existing`.
pub async fn link(existing: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<(), FsError> {
    let (existing, new) = (existing.as_ref(), new.as_ref());
    fs::hard_link(existing, new).await.context(LinkSnafu {
        operation: "link",
        from: existing,
        to: new,
    })
}

/// Creates a symlink at `path` whose content is `target`.
pub async fn symlink(
    target: impl AsRef<Path>,
    path: impl AsRef<Path>,
    kind: SymlinkKind,
) -> Result<(), FsError> {
    let (target, path) = (target.as_ref(), path.as_ref());

    #[cfg(unix)]
    let result = {
        let _ = kind;
        fs::symlink(target, path).await
    };
    #[cfg(windows)]
    let result = {
        let (original, link) = (target.to_path_buf(), path.to_path_buf());
        run_blocking(move || match kind {
            SymlinkKind::File => std::os::windows::fs::symlink_file(&original, &link),
            SymlinkKind::Dir => std::os::windows::fs::symlink_dir(&original, &link),
        })
        .await
    };

    result.context(LinkSnafu {
        operation: "symlink",
        from: target,
        to: path,
    })
}

pub async fn readlink(path: impl AsRef<Path>) -> Result<PathBuf, FsError> {
    blocking_at("readlink", path.as_ref(), |path| std_fs::read_link(path)).await
}

/// Canonical absolute form of `path`, with every symlink resolved.
pub async fn realpath(path: impl AsRef<Path>) -> Result<PathBuf, FsError> {
    blocking_at("realpath", path.as_ref(), |path| std_fs::canonicalize(path)).await
}

pub async fn unlink(path: impl AsRef<Path>) -> Result<(), FsError> {
    let path = path.as_ref();
    fs::remove_file(path).await.context(IoSnafu {
        operation: "unlink",
        path,
    })
}

pub async fn rmdir(path: impl AsRef<Path>) -> Result<(), FsError> {
    let path = path.as_ref();
    fs::remove_dir(path).await.context(IoSnafu {
        operation: "rmdir",
        path,
    })
}

/// Creates a single directory. Without a `mode` the OS default applies.
pub async fn mkdir(path: impl AsRef<Path>, mode: Option<u32>) -> Result<(), FsError> {
    let path = path.as_ref();
    match mode {
        None => fs::create_dir(path).await.context(IoSnafu {
            operation: "mkdir",
            path,
        }),
        Some(mode) => {
            blocking_at("mkdir", path, move |path| {
                let mut builder = DirBuilder::new();
                #[cfg(unix)]
                std::os::unix::fs::DirBuilderExt::mode(&mut builder, mode);
                #[cfg(not(unix))]
                let _ = mode;
                builder.create(path)
            })
            .await
        }
    }
}

/// Entry names of a directory, in whatever order the OS hands them out.
pub async fn readdir(path: impl AsRef<Path>) -> Result<Vec<OsString>, FsError> {
    blocking_at("readdir", path.as_ref(), |path| {
        std_fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<io::Result<Vec<_>>>()
    })
    .await
}

pub async fn utimes(
    path: impl AsRef<Path>,
    atime: SystemTime,
    mtime: SystemTime,
) -> Result<(), FsError> {
    blocking_at("utimes", path.as_ref(), move |path| {
        filetime::set_file_times(
            path,
            FileTime::from_system_time(atime),
            FileTime::from_system_time(mtime),
        )
    })
    .await
}

#[cfg(unix)]
pub async fn chown(path: impl AsRef<Path>, uid: u32, gid: u32) -> Result<(), FsError> {
    blocking_at("chown", path.as_ref(), move |path| {
        std::os::unix::fs::chown(path, Some(uid), Some(gid))
    })
    .await
}

#[cfg(unix)]
pub async fn lchown(path: impl AsRef<Path>, uid: u32, gid: u32) -> Result<(), FsError> {
    blocking_at("lchown", path.as_ref(), move |path| {
        std::os::unix::fs::lchown(path, Some(uid), Some(gid))
    })
    .await
}

#[cfg(unix)]
pub async fn chmod(path: impl AsRef<Path>, mode: u32) -> Result<(), FsError> {
    set_mode("chmod", path.as_ref(), mode).await
}

/// Changes the mode of `path` without following a final symlink. Linux has
/// no way to change the mode of a link itself, so a symlink is rejected
/// with `ENOSYS`.
#[cfg(unix)]
pub async fn lchmod(path: impl AsRef<Path>, mode: u32) -> Result<(), FsError> {
    let path = path.as_ref();
    if lstat(path).await?.is_symlink() {
        return Err(io::Error::from(io::ErrorKind::Unsupported)).context(IoSnafu {
            operation: "lchmod",
            path,
        });
    }
    set_mode("lchmod", path, mode).await
}

#[cfg(unix)]
async fn set_mode(operation: &'static str, path: &Path, mode: u32) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;

    blocking_at(operation, path, move |path| {
        std_fs::set_permissions(path, std_fs::Permissions::from_mode(mode))
    })
    .await
}
