use std::io::{self, Write};
use std::time::UNIX_EPOCH;

use pfs::ext::{BestEffortPathExt, LossyNameExt};
use pfs::primitives::{self, FsError};
use pfs::{Pfs, ShellError, ShellOptions, SizeDescriber, sh};
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::render::render_tree;
use crate::cli::Command;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);
        let pfs = Pfs::from(app_config.working_dir);

        match app_config.command {
            Command::Mkdirp { path } => {
                pfs.mkdirp(&path).await.context(FilesystemSnafu)?;
                info!("Ensured directory {}", path.best_effort_path_display());
            }
            Command::Rm { path } => {
                pfs.rm(&path).await.context(FilesystemSnafu)?;
                info!("Removed {}", path.best_effort_path_display());
            }
            Command::Tree { path, sizes } => {
                let root = pfs
                    .resolver()
                    .resolve_optional(path.as_ref())
                    .context(FilesystemSnafu)?;
                let title = root.best_effort_path_display();
                let rendered = if sizes {
                    let tree = pfs
                        .tree_with(&root, &SizeDescriber)
                        .await
                        .context(FilesystemSnafu)?;
                    render_tree(&title, &tree, |len| Some(format!("{len} B")))
                } else {
                    let tree = pfs.tree(&root).await.context(FilesystemSnafu)?;
                    render_tree(&title, &tree, |_| None)
                };
                Self::print(rendered.as_bytes())?;
            }
            Command::Ls { path } => {
                let dir = pfs
                    .resolver()
                    .resolve_optional(path.as_ref())
                    .context(FilesystemSnafu)?;
                let listing = primitives::ls(&dir)
                    .await
                    .context(FilesystemSnafu)?
                    .iter()
                    .map(|entry| format!("{}\n", entry.lossy_name()))
                    .collect::<String>();
                Self::print(listing.as_bytes())?;
            }
            Command::Stat { path } => {
                let path = pfs.resolve(&path).context(FilesystemSnafu)?;
                let stat = primitives::stat(&path).await.context(FilesystemSnafu)?;
                let mut report = format!(
                    "{}: {}, {} bytes\n",
                    path.best_effort_path_display(),
                    stat.kind,
                    stat.len
                );
                if let Some(modified) = stat
                    .modified
                    .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                {
                    report.push_str(&format!("modified: {}s since epoch\n", modified.as_secs()));
                }
                Self::print(report.as_bytes())?;
            }
            Command::Sh { command, string } => {
                let output = sh(&command, ShellOptions { string })
                    .await
                    .context(CommandSnafu)?;
                Self::print(output.as_bytes())?;
            }
        }

        Ok(())
    }

    fn print(bytes: &[u8]) -> Result<(), ApplicationError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .context(OutputSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Filesystem operation failed"))]
    FilesystemError { source: FsError },
    #[snafu(display("Shell command failed"))]
    CommandError { source: ShellError },
    #[snafu(display("Failed to write output"))]
    OutputError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pfs::WorkingDir;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, command: Command) -> RuntimeConfig {
        RuntimeConfig {
            working_dir: WorkingDir::Fixed(dir.path().to_path_buf()),
            command,
        }
    }

    #[compio::test]
    async fn test_run_mkdirp_then_rm() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        Application::run(config(
            &temp_dir,
            Command::Mkdirp {
                path: "x/y".into(),
            },
        ))
        .await
        .unwrap();
        assert!(temp_dir.path().join("x").join("y").is_dir());

        Application::run(config(&temp_dir, Command::Rm { path: "x".into() }))
            .await
            .unwrap();
        assert!(!temp_dir.path().join("x").exists());
    }

    #[compio::test]
    async fn test_run_rm_missing_path_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let err = Application::run(config(
            &temp_dir,
            Command::Rm {
                path: "missing".into(),
            },
        ))
        .await
        .unwrap_err();

        assert!(matches!(err, ApplicationError::FilesystemError { .. }));
    }

    #[compio::test]
    async fn test_run_tree_with_sizes() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), b"abc").unwrap();

        Application::run(config(
            &temp_dir,
            Command::Tree {
                path: None,
                sizes: true,
            },
        ))
        .await
        .unwrap();
    }
}
