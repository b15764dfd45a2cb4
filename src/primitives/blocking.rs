use std::io;
use std::panic::resume_unwind;
use std::path::Path;

use compio::runtime::spawn_blocking;
use snafu::ResultExt;

use crate::primitives::{FsError, IoSnafu};

/// Runs a blocking syscall on the runtime's blocking pool, re-raising any
/// panic on the awaiting task.
pub(crate) async fn run_blocking<T, F>(work: F) -> T
where
    F: FnOnce() -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    match spawn_blocking(work).await {
        Ok(value) => value,
        Err(panic) => resume_unwind(panic),
    }
}

/// [`run_blocking`] for a primitive keyed on a single path.
pub(crate) async fn blocking_at<T, F>(
    operation: &'static str,
    path: &Path,
    work: F,
) -> Result<T, FsError>
where
    F: FnOnce(&Path) -> io::Result<T> + Send + Sync + 'static,
    T: Send + 'static,
{
    let target = path.to_path_buf();
    run_blocking(move || work(&target))
        .await
        .context(IoSnafu { operation, path })
}
