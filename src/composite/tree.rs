//! Snapshotting a directory subtree into a nested mapping.
//!
//! Directories become a [`TreeNode::Directory`] keyed by entry name, in the
//! order the directory listing produced them. Names are kept as `OsString`
//! so entries that are not valid UTF-8 stay distinct. Everything else becomes a
//! [`TreeNode::Leaf`] whose value comes from a [`FileDescriber`]; swapping
//! the describer changes every leaf of the result without touching the walk.

use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::path::{Path, PathBuf};

use derive_more::IsVariant;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, join_all};
use hashlink::LinkedHashMap;
use tracing::debug;

use crate::composite::Pfs;
use crate::ext::BestEffortPathExt;
use crate::primitives::{self, FsError};

/// The leaf value used when no describer is supplied.
pub const FILE_MARKER: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum TreeNode<L = String> {
    Leaf(L),
    Directory(LinkedHashMap<OsString, TreeNode<L>>),
}

impl<L> TreeNode<L> {
    pub fn leaf(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Directory(_) => None,
        }
    }

    pub fn children(&self) -> Option<&LinkedHashMap<OsString, TreeNode<L>>> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Directory(children) => Some(children),
        }
    }

    /// The direct child called `name`, if this is a directory that has one.
    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&TreeNode<L>> {
        self.children()
            .and_then(|children| children.get(name.as_ref()))
    }
}

/// Describes a non-directory entry for [`Pfs::tree_with`].
///
/// Any `Fn(PathBuf) -> impl Future<Output = Result<T, FsError>>` is a
/// describer too.
#[allow(async_fn_in_trait)]
pub trait FileDescriber {
    type Leaf;

    async fn describe(&self, path: &Path) -> Result<Self::Leaf, FsError>;
}

/// Describes every file as [`FILE_MARKER`], whatever its path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMarker;

impl FileDescriber for FileMarker {
    type Leaf = String;

    async fn describe(&self, _path: &Path) -> Result<String, FsError> {
        Ok(FILE_MARKER.to_string())
    }
}

/// Describes a file by its length in bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeDescriber;

impl FileDescriber for SizeDescriber {
    type Leaf = u64;

    async fn describe(&self, path: &Path) -> Result<u64, FsError> {
        primitives::stat(path).await.map(|stat| stat.len)
    }
}

impl<F, Fut, T> FileDescriber for F
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = Result<T, FsError>>,
{
    type Leaf = T;

    async fn describe(&self, path: &Path) -> Result<T, FsError> {
        self(path.to_path_buf()).await
    }
}

impl Pfs {
    /// Snapshot of the subtree at `path`, with every file described as
    /// `"file"`.
    pub async fn tree(&self, path: impl AsRef<Path>) -> Result<TreeNode, FsError> {
        self.tree_with(path, &FileMarker).await
    }

    /// Snapshot of the subtree at `path`, with files described by `describer`.
    pub async fn tree_with<D: FileDescriber>(
        &self,
        path: impl AsRef<Path>,
        describer: &D,
    ) -> Result<TreeNode<D::Leaf>, FsError> {
        self.tree_at(path.as_ref().to_path_buf(), describer).await
    }

    /// The default leaf description, `"file"`.
    pub async fn get_file(&self, path: impl AsRef<Path>) -> Result<String, FsError> {
        FileMarker.describe(path.as_ref()).await
    }

    fn tree_at<'a, D>(
        &'a self,
        path: PathBuf,
        describer: &'a D,
    ) -> LocalBoxFuture<'a, Result<TreeNode<D::Leaf>, FsError>>
    where
        D: FileDescriber,
        D::Leaf: 'a,
    {
        async move {
            let path = self.resolve(&path)?;
            let stat = primitives::stat(&path).await?;

            if !stat.is_dir() {
                return describer.describe(&path).await.map(TreeNode::Leaf);
            }

            let entries = primitives::ls(&path).await?;
            debug!(
                "Walking {} entries below {}",
                entries.len(),
                path.best_effort_path_display()
            );

            let subtrees =
                join_all(entries.iter().map(|entry| self.tree_at(path.join(entry), describer)))
                    .await;

            entries
                .into_iter()
                .zip(subtrees)
                .map(|(entry, subtree)| Ok((entry, subtree?)))
                .collect::<Result<LinkedHashMap<_, _>, FsError>>()
                .map(TreeNode::Directory)
        }
        .boxed_local()
    }
}
