//! Asynchronous filesystem primitives plus a handful of recursive composites.
//!
//! Every primitive in [`primitives`] completes exactly once, either with its
//! result or with an [`FsError`] carrying a machine-readable [`ErrorCode`].
//! On top of them, [`Pfs`] offers `mkdirp`, `rm` and `tree`, all of which
//! resolve their input against a [`WorkingDir`] when they start. The shell
//! runner in [`shell`] is independent of both.

#![allow(clippy::enum_variant_names)]

pub mod composite;
pub mod ext;
pub mod path;
pub mod primitives;
pub mod shell;

pub use composite::{FileDescriber, FileMarker, Pfs, SizeDescriber, TreeNode};
pub use path::{PathResolver, WorkingDir};
pub use primitives::{Descriptor, ErrorCode, FileKind, FsError, OpenFlags, Stat};
pub use shell::{ShellError, ShellOptions, ShellOutput, sh};
