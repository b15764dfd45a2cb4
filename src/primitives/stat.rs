use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

use derive_more::{Display, IsVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum FileKind {
    #[display("file")]
    File,
    #[display("directory")]
    Directory,
    #[display("symlink")]
    Symlink,
    #[display("other")]
    Other,
}

/// Metadata of a filesystem entry, as reported by the stat family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub kind: FileKind,
    pub len: u64,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
}

impl Stat {
    pub fn is_dir(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }

    fn from_metadata(metadata: &impl EntryMetadata) -> Self {
        let kind = if metadata.is_symlink() {
            FileKind::Symlink
        } else if metadata.is_dir() {
            FileKind::Directory
        } else if metadata.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        };
        Self {
            kind,
            len: metadata.len(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
        }
    }
}

/// The accessors shared by the std and compio metadata types.
trait EntryMetadata {
    fn is_dir(&self) -> bool;
    fn is_file(&self) -> bool;
    fn is_symlink(&self) -> bool;
    fn len(&self) -> u64;
    fn modified(&self) -> io::Result<SystemTime>;
    fn accessed(&self) -> io::Result<SystemTime>;
}

impl EntryMetadata for Metadata {
    fn is_dir(&self) -> bool {
        Metadata::is_dir(self)
    }

    fn is_file(&self) -> bool {
        Metadata::is_file(self)
    }

    fn is_symlink(&self) -> bool {
        Metadata::is_symlink(self)
    }

    fn len(&self) -> u64 {
        Metadata::len(self)
    }

    fn modified(&self) -> io::Result<SystemTime> {
        Metadata::modified(self)
    }

    fn accessed(&self) -> io::Result<SystemTime> {
        Metadata::accessed(self)
    }
}

impl EntryMetadata for compio::fs::Metadata {
    fn is_dir(&self) -> bool {
        compio::fs::Metadata::is_dir(self)
    }

    fn is_file(&self) -> bool {
        compio::fs::Metadata::is_file(self)
    }

    fn is_symlink(&self) -> bool {
        compio::fs::Metadata::is_symlink(self)
    }

    fn len(&self) -> u64 {
        compio::fs::Metadata::len(self)
    }

    fn modified(&self) -> io::Result<SystemTime> {
        compio::fs::Metadata::modified(self)
    }

    fn accessed(&self) -> io::Result<SystemTime> {
        compio::fs::Metadata::accessed(self)
    }
}

impl From<Metadata> for Stat {
    fn from(metadata: Metadata) -> Self {
        Self::from_metadata(&metadata)
    }
}

impl From<compio::fs::Metadata> for Stat {
    fn from(metadata: compio::fs::Metadata) -> Self {
        Self::from_metadata(&metadata)
    }
}
