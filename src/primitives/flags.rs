use std::fs::OpenOptions;
use std::str::FromStr;

use derive_more::Display;
use snafu::Snafu;

/// The classic `open` flag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum OpenFlags {
    #[default]
    #[display("r")]
    Read,
    #[display("r+")]
    ReadWrite,
    #[display("w")]
    Write,
    #[display("wx")]
    WriteExclusive,
    #[display("w+")]
    WriteRead,
    #[display("wx+")]
    WriteReadExclusive,
    #[display("a")]
    Append,
    #[display("ax")]
    AppendExclusive,
    #[display("a+")]
    AppendRead,
    #[display("ax+")]
    AppendReadExclusive,
}

impl OpenFlags {
    pub(crate) fn to_options(self, mode: u32) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenFlags::Read => options.read(true),
            OpenFlags::ReadWrite => options.read(true).write(true),
            OpenFlags::Write => options.write(true).create(true).truncate(true),
            OpenFlags::WriteExclusive => options.write(true).create_new(true),
            OpenFlags::WriteRead => options.read(true).write(true).create(true).truncate(true),
            OpenFlags::WriteReadExclusive => options.read(true).write(true).create_new(true),
            OpenFlags::Append => options.append(true).create(true),
            OpenFlags::AppendExclusive => options.append(true).create_new(true),
            OpenFlags::AppendRead => options.read(true).append(true).create(true),
            OpenFlags::AppendReadExclusive => options.read(true).append(true).create_new(true),
        };

        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, mode);
        #[cfg(not(unix))]
        let _ = mode;

        options
    }
}

impl FromStr for OpenFlags {
    type Err = UnknownFlagError;

    fn from_str(flag: &str) -> Result<Self, Self::Err> {
        match flag {
            "r" => Ok(OpenFlags::Read),
            "r+" => Ok(OpenFlags::ReadWrite),
            "w" => Ok(OpenFlags::Write),
            "wx" | "xw" => Ok(OpenFlags::WriteExclusive),
            "w+" => Ok(OpenFlags::WriteRead),
            "wx+" | "xw+" => Ok(OpenFlags::WriteReadExclusive),
            "a" => Ok(OpenFlags::Append),
            "ax" | "xa" => Ok(OpenFlags::AppendExclusive),
            "a+" => Ok(OpenFlags::AppendRead),
            "ax+" | "xa+" => Ok(OpenFlags::AppendReadExclusive),
            _ => UnknownFlagSnafu { flag }.fail(),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Unknown open flag '{flag}'"))]
pub struct UnknownFlagError {
    flag: String,
}

/// Only consulted on Windows, where link creation depends on the target kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymlinkKind {
    #[default]
    File,
    Dir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteFileOptions {
    pub flag: OpenFlags,
    pub mode: u32,
}

impl Default for WriteFileOptions {
    fn default() -> Self {
        Self {
            flag: OpenFlags::Write,
            mode: 0o666,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("r", OpenFlags::Read)]
    #[case("r+", OpenFlags::ReadWrite)]
    #[case("wx", OpenFlags::WriteExclusive)]
    #[case("xw", OpenFlags::WriteExclusive)]
    #[case("a+", OpenFlags::AppendRead)]
    #[case("xa+", OpenFlags::AppendReadExclusive)]
    fn test_parse_flags(#[case] input: &str, #[case] expected: OpenFlags) {
        assert_eq!(input.parse::<OpenFlags>().unwrap(), expected);
    }

    #[test]
    fn test_flags_display_as_canonical_string() {
        assert_eq!(OpenFlags::WriteReadExclusive.to_string(), "wx+");
        assert_eq!(OpenFlags::default().to_string(), "r");
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = "rw".parse::<OpenFlags>().unwrap_err();

        assert_eq!(err.to_string(), "Unknown open flag 'rw'");
    }
}
