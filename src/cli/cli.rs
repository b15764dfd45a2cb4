use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Recursive filesystem helpers: mkdir -p, rm -r, tree and sh")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// Directory relative paths are resolved against (defaults to the current one)
    #[clap(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a directory along with any missing parents
    Mkdirp { path: PathBuf },
    /// Remove a file, or a directory and everything below it
    Rm { path: PathBuf },
    /// Print the directory tree below a path
    Tree {
        path: Option<PathBuf>,
        /// Show the size of every file
        #[clap(long)]
        sizes: bool,
    },
    /// List the entries of a directory
    Ls { path: Option<PathBuf> },
    /// Show what kind of entry a path is and how large it is
    Stat { path: PathBuf },
    /// Run a shell command and print its output
    Sh {
        command: String,
        /// Decode the output as text before printing it
        #[clap(long)]
        string: bool,
    },
}
