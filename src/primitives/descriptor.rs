use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use filetime::FileTime;
use snafu::ResultExt;
use tracing::debug;

use crate::ext::BestEffortPathExt;
use crate::primitives::blocking::run_blocking;
use crate::primitives::{FsError, IoSnafu, OpenFlags, Stat};

/// An open file. Clones share the same underlying handle, which is released
/// once [`close`] has consumed the last one.
#[derive(Debug, Clone)]
pub struct Descriptor {
    file: Arc<File>,
    path: PathBuf,
}

impl Descriptor {
    /// The path this descriptor was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub async fn open(
    path: impl AsRef<Path>,
    flags: OpenFlags,
    mode: u32,
) -> Result<Descriptor, FsError> {
    let path = path.as_ref().to_path_buf();
    let options = flags.to_options(mode);
    let target = path.clone();

    let file = run_blocking(move || options.open(&target))
        .await
        .context(IoSnafu {
            operation: "open",
            path: &path,
        })?;
    debug!("Opened {} with flags '{}'", path.best_effort_path_display(), flags);

    Ok(Descriptor {
        file: Arc::new(file),
        path,
    })
}

pub async fn close(fd: Descriptor) -> Result<(), FsError> {
    let Descriptor { file, path } = fd;
    run_blocking(move || drop(file)).await;
    debug!("Closed {}", path.best_effort_path_display());
    Ok(())
}

async fn with_file<T, F>(fd: &Descriptor, operation: &'static str, work: F) -> Result<T, FsError>
where
    F: FnOnce(&File) -> io::Result<T> + Send + Sync + 'static,
    T: Send + 'static,
{
    let file = Arc::clone(&fd.file);
    run_blocking(move || work(&file))
        .await
        .context(IoSnafu {
            operation,
            path: fd.path(),
        })
}

pub async fn ftruncate(fd: &Descriptor, len: u64) -> Result<(), FsError> {
    with_file(fd, "ftruncate", move |file| file.set_len(len)).await
}

pub async fn fstat(fd: &Descriptor) -> Result<Stat, FsError> {
    with_file(fd, "fstat", |file| file.metadata().map(Stat::from)).await
}

pub async fn fsync(fd: &Descriptor) -> Result<(), FsError> {
    with_file(fd, "fsync", |file| file.sync_all()).await
}

pub async fn futimes(fd: &Descriptor, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
    with_file(fd, "futimes", move |file| {
        filetime::set_file_handle_times(
            file,
            Some(FileTime::from_system_time(atime)),
            Some(FileTime::from_system_time(mtime)),
        )
    })
    .await
}

#[cfg(unix)]
pub async fn fchown(fd: &Descriptor, uid: u32, gid: u32) -> Result<(), FsError> {
    with_file(fd, "fchown", move |file| {
        std::os::unix::fs::fchown(file, Some(uid), Some(gid))
    })
    .await
}

#[cfg(unix)]
pub async fn fchmod(fd: &Descriptor, mode: u32) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;

    with_file(fd, "fchmod", move |file| {
        file.set_permissions(std::fs::Permissions::from_mode(mode))
    })
    .await
}

/// Reads up to `length` bytes into `buffer[offset..]`.
///
/// With `position == None` the read starts at, and advances, the current
/// file position; otherwise it is positional and leaves it alone. Returns
/// the number of bytes read, `0` at end of file.
pub async fn read(
    fd: &Descriptor,
    buffer: &mut [u8],
    offset: usize,
    length: usize,
    position: Option<u64>,
) -> Result<usize, FsError> {
    let range = checked_range(buffer.len(), offset, length).context(IoSnafu {
        operation: "read",
        path: fd.path(),
    })?;

    let chunk = with_file(fd, "read", move |file| {
        let mut chunk = vec![0; length];
        let count = read_chunk(file, &mut chunk, position)?;
        chunk.truncate(count);
        Ok(chunk)
    })
    .await?;

    buffer[range.start..range.start + chunk.len()].copy_from_slice(&chunk);
    Ok(chunk.len())
}

/// Writes `buffer[offset..offset + length]`, returning how many bytes the
/// OS accepted. Positioning follows the same rules as [`read`].
pub async fn write(
    fd: &Descriptor,
    buffer: &[u8],
    offset: usize,
    length: usize,
    position: Option<u64>,
) -> Result<usize, FsError> {
    let range = checked_range(buffer.len(), offset, length).context(IoSnafu {
        operation: "write",
        path: fd.path(),
    })?;
    let chunk = buffer[range].to_vec();

    with_file(fd, "write", move |file| write_chunk(file, &chunk, position)).await
}

fn checked_range(capacity: usize, offset: usize, length: usize) -> io::Result<Range<usize>> {
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(offset..end),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("range {offset}+{length} is outside a buffer of {capacity} bytes"),
        )),
    }
}

fn read_chunk(mut file: &File, chunk: &mut [u8], position: Option<u64>) -> io::Result<usize> {
    match position {
        None => file.read(chunk),
        #[cfg(unix)]
        Some(position) => std::os::unix::fs::FileExt::read_at(file, chunk, position),
        #[cfg(windows)]
        Some(position) => std::os::windows::fs::FileExt::seek_read(file, chunk, position),
    }
}

fn write_chunk(mut file: &File, chunk: &[u8], position: Option<u64>) -> io::Result<usize> {
    match position {
        None => file.write(chunk),
        #[cfg(unix)]
        Some(position) => std::os::unix::fs::FileExt::write_at(file, chunk, position),
        #[cfg(windows)]
        Some(position) => std::os::windows::fs::FileExt::seek_write(file, chunk, position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::ErrorCode;
    use tempfile::TempDir;

    #[compio::test]
    async fn test_write_then_positional_read() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data.bin");

        let fd = open(&path, OpenFlags::WriteRead, 0o644).await.unwrap();
        let written = write(&fd, b"--hello world--", 2, 11, None).await.unwrap();
        assert_eq!(written, 11);

        let mut buffer = [0u8; 8];
        let count = read(&fd, &mut buffer, 3, 5, Some(6)).await.unwrap();
        assert_eq!(count, 5);
        assert_eq!(&buffer, b"\0\0\0world");

        fsync(&fd).await.unwrap();
        close(fd).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }

    #[compio::test]
    async fn test_read_advances_current_position() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data.txt");
        std::fs::write(&path, b"abcdef").unwrap();

        let fd = open(&path, OpenFlags::Read, 0o666).await.unwrap();
        let mut buffer = [0u8; 3];

        read(&fd, &mut buffer, 0, 3, None).await.unwrap();
        assert_eq!(&buffer, b"abc");
        read(&fd, &mut buffer, 0, 3, None).await.unwrap();
        assert_eq!(&buffer, b"def");
        assert_eq!(read(&fd, &mut buffer, 0, 3, None).await.unwrap(), 0);

        close(fd).await.unwrap();
    }

    #[compio::test]
    async fn test_out_of_range_buffer_is_invalid_input() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fd = open(temp_dir.path().join("f"), OpenFlags::Write, 0o666)
            .await
            .unwrap();

        let err = write(&fd, b"abc", 2, 5, None).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidInput);
        close(fd).await.unwrap();
    }

    #[compio::test]
    async fn test_ftruncate_and_fstat() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data.txt");
        std::fs::write(&path, b"0123456789").unwrap();

        let fd = open(&path, OpenFlags::ReadWrite, 0o666).await.unwrap();
        ftruncate(&fd, 4).await.unwrap();

        let stat = fstat(&fd).await.unwrap();
        assert!(stat.is_file());
        assert_eq!(stat.len, 4);
        close(fd).await.unwrap();
    }

    #[compio::test]
    async fn test_exclusive_open_of_existing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("exists");
        std::fs::write(&path, b"").unwrap();

        let err = open(&path, OpenFlags::WriteExclusive, 0o666)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AlreadyExists);
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[compio::test]
    async fn test_futimes_sets_modification_time() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data.txt");
        std::fs::write(&path, b"x").unwrap();
        let mtime = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(2_000_000);

        let fd = open(&path, OpenFlags::ReadWrite, 0o666).await.unwrap();
        futimes(&fd, mtime, mtime).await.unwrap();
        close(fd).await.unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), mtime);
    }

    #[cfg(unix)]
    #[compio::test]
    async fn test_fchmod_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("data.txt");

        let fd = open(&path, OpenFlags::Write, 0o666).await.unwrap();
        fchmod(&fd, 0o640).await.unwrap();
        close(fd).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
