use std::io::Write;
use std::path::Path;

use compio::fs;
use snafu::ResultExt;

use crate::primitives::blocking::blocking_at;
use crate::primitives::{FsError, IoSnafu, WriteFileOptions};

/// Reads a whole file into memory.
pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, FsError> {
    let path = path.as_ref();
    fs::read(path).await.context(IoSnafu {
        operation: "readFile",
        path,
    })
}

/// Writes `data` as the whole content of `path`, or appends it when the
/// flag says so.
pub async fn write_file(
    path: impl AsRef<Path>,
    data: impl Into<Vec<u8>>,
    options: WriteFileOptions,
) -> Result<(), FsError> {
    let data = data.into();
    blocking_at("writeFile", path.as_ref(), move |path| {
        let mut file = options.flag.to_options(options.mode).open(path)?;
        file.write_all(&data)?;
        file.flush()
    })
    .await
}
