//! One async function per filesystem primitive.
//!
//! Each call completes exactly once: with the primitive's result, or with an
//! [`FsError`] naming the operation, the path(s) involved and an
//! [`ErrorCode`]. Calls the runtime supports natively go through
//! `compio::fs`; the rest run on the runtime's blocking pool.

mod blocking;
mod contents;
mod descriptor;
mod error;
mod flags;
mod path_ops;
mod stat;

pub use contents::{read_file, write_file};
#[cfg(unix)]
pub use descriptor::{fchmod, fchown};
pub use descriptor::{Descriptor, close, fstat, fsync, ftruncate, futimes, open, read, write};
pub use error::{ErrorCode, FsError};
pub(crate) use error::{CurrentDirSnafu, IoSnafu, LinkSnafu, OccupiedPathSnafu};
pub use flags::{OpenFlags, SymlinkKind, UnknownFlagError, WriteFileOptions};
#[cfg(unix)]
pub use path_ops::{chmod, chown, lchmod, lchown};
pub use path_ops::{
    link, lstat, mkdir, readdir, readdir as ls, readlink, realpath, rename, rmdir, stat, symlink,
    unlink, utimes,
};
pub use stat::{FileKind, Stat};
