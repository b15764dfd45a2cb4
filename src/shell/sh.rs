use std::process::Stdio;

use compio::process::Command;
use derive_more::{Display, IsVariant};
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShellOptions {
    /// Decode the captured output as text instead of returning raw bytes.
    pub string: bool,
}

impl ShellOptions {
    pub fn string() -> Self {
        Self { string: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, IsVariant, Display)]
pub enum ShellOutput {
    #[display("{_0}")]
    Text(String),
    #[display("{}", String::from_utf8_lossy(_0))]
    Bytes(Vec<u8>),
}

impl ShellOutput {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ShellOutput::Text(text) => text.as_bytes(),
            ShellOutput::Bytes(bytes) => bytes,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ShellOutput::Text(text) => Some(text),
            ShellOutput::Bytes(_) => None,
        }
    }
}

/// Runs `command` through the host shell and resolves with its standard
/// output once it exits successfully.
pub async fn sh(command: &str, options: ShellOptions) -> Result<ShellOutput, ShellError> {
    debug!("Running shell command '{}'", command);

    let output = create_command(command)
        .output()
        .await
        .context(SpawnSnafu { command })?;

    if !output.status.success() {
        let status = output.status.code().unwrap_or(-1);
        debug!("Shell command '{}' exited with {}", command, status);
        return UnsuccessfulExecutionSnafu {
            command,
            status,
            stderr: String::from_utf8_lossy(&output.stderr),
        }
        .fail();
    }

    info!("Shell command '{}' completed successfully", command);
    if options.string {
        Ok(ShellOutput::Text(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    } else {
        Ok(ShellOutput::Bytes(output.stdout))
    }
}

/// The shell invocation for the host OS.
fn full_command(command: &str) -> (&'static str, [&str; 2]) {
    #[cfg(target_family = "windows")]
    {
        ("cmd", ["/C", command])
    }
    #[cfg(target_family = "unix")]
    {
        ("sh", ["-c", command])
    }
}

fn create_command(command: &str) -> Command {
    let (shell, args) = full_command(command);
    let mut cmd = Command::new(shell);
    cmd.args(args);
    let _ = cmd.stdin(Stdio::null());
    let _ = cmd.stdout(Stdio::piped());
    let _ = cmd.stderr(Stdio::piped());
    cmd
}

#[derive(Debug, Snafu)]
pub enum ShellError {
    #[snafu(display("Failed to run shell command '{}'", command))]
    SpawnError {
        command: String,
        source: std::io::Error,
    },
    #[snafu(display("Shell command '{}' failed with exit code {}", command, status))]
    UnsuccessfulExecution {
        command: String,
        status: i32,
        stderr: String,
    },
}
