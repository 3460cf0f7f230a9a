use std::io;
use std::path::PathBuf;

use bimpie::{BmpError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("duplicate option {0}")]
    DuplicateOption(String),
    #[error("could not open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a BMP file", .path.display())]
    NotBmp {
        path: PathBuf,
        #[source]
        source: BmpError,
    },
    #[error("{} is corrupted", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: BmpError,
    },
    #[error("reading from {} failed", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: BmpError,
    },
    #[error("writing to {} failed", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BmpError,
    },
    #[error("{}: {source}", .path.display())]
    Other { path: PathBuf, source: BmpError },
}

impl CliError {
    /// Classify a codec error for the file it came from.
    pub fn codec(path: PathBuf, source: BmpError) -> Self {
        match source.kind() {
            ErrorKind::StructurallyInvalid => Self::NotBmp { path, source },
            ErrorKind::Corrupted => Self::Corrupted { path, source },
            ErrorKind::ReadFailure => Self::Read { path, source },
            ErrorKind::WriteFailure => Self::Write { path, source },
            ErrorKind::Resource | ErrorKind::Cancelled => Self::Other { path, source },
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DuplicateOption(_) => 2,
            Self::NotBmp { .. } => 7,
            Self::Corrupted { .. } => 8,
            Self::Open { .. } => 9,
            Self::Read { .. } => 10,
            Self::Write { .. } => 11,
            Self::Other { .. } => 1,
        }
    }
}
