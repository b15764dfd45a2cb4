use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};
use tracing::debug;

use crate::composite::Pfs;
use crate::ext::BestEffortPathExt;
use crate::primitives::{self, FsError};

impl Pfs {
    /// Removes the file at `path`, or the directory and everything below it.
    ///
    /// All children of a directory are removed concurrently. A failing child
    /// does not stop its siblings: they all run to completion, after which
    /// the first failure (in listing order) is returned and the directory
    /// itself is kept. Whatever was already removed stays removed.
    pub async fn rm(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        self.rm_at(path.as_ref().to_path_buf()).await
    }

    fn rm_at(&self, path: PathBuf) -> LocalBoxFuture<'_, Result<(), FsError>> {
        async move {
            let path = self.resolve(&path)?;
            let stat = primitives::stat(&path).await?;

            if !stat.is_dir() {
                debug!("Unlinking {}", path.best_effort_path_display());
                return primitives::unlink(&path).await;
            }

            let entries = primitives::ls(&path).await?;
            debug!(
                "Removing {} entries below {}",
                entries.len(),
                path.best_effort_path_display()
            );

            join_all(entries.iter().map(|entry| self.rm_at(path.join(entry))))
                .await
                .into_iter()
                .collect::<Result<Vec<()>, FsError>>()?;

            primitives::rmdir(&path).await
        }
        .boxed_local()
    }
}
