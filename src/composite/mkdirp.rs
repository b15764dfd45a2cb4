use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::composite::Pfs;
use crate::ext::BestEffortPathExt;
use crate::primitives::{self, FsError, OccupiedPathSnafu};

impl Pfs {
    /// Makes sure a directory exists at `path`, creating missing ancestors
    /// first. An existing directory is left untouched; an existing
    /// non-directory fails with [`FsError::OccupiedPath`].
    pub async fn mkdirp(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        self.mkdirp_at(path.as_ref().to_path_buf()).await
    }

    fn mkdirp_at(&self, path: PathBuf) -> LocalBoxFuture<'_, Result<(), FsError>> {
        async move {
            let path = self.resolve(&path)?;
            let stat = primitives::stat(&path).await;
            match stat {
                Ok(stat) if stat.is_dir() => Ok(()),
                Ok(_) => OccupiedPathSnafu { path }.fail(),
                Err(err) if err.is_not_found() => {
                    // The root is its own parent; stop there and let mkdir report.
                    let parent = path.parent().filter(|parent| *parent != path.as_path());
                    if let Some(parent) = parent {
                        self.mkdirp_at(parent.to_path_buf()).await?;
                    }
                    debug!("Creating directory {}", path.best_effort_path_display());
                    primitives::mkdir(&path, None).await
                }
                Err(err) => Err(err),
            }
        }
        .boxed_local()
    }
}
