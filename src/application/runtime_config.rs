use pfs::WorkingDir;

use crate::cli::{Cli, Command};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub working_dir: WorkingDir,
    pub command: Command,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            working_dir: WorkingDir::from(cli.cwd),
            command: cli.command,
        }
    }
}
