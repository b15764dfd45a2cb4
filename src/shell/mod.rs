//! Running a shell command and capturing what it prints.

mod sh;

pub use sh::{ShellError, ShellOptions, ShellOutput, sh};
