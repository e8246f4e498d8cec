//! Error types for loading and decoding documents

use std::path::PathBuf;
use thiserror::Error;

use super::tokenizer::Mode;

/// Failure while decoding the token stream.
///
/// Every variant leaves the session closed; later reads report `Misuse`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A tag byte that matches no case of the active grammar
    #[error("malformed document: unexpected byte 0x{byte:02x} at offset {position} in {mode} mode")]
    Malformed {
        byte: u8,
        position: usize,
        mode: Mode,
    },

    /// The buffer ended before a tag byte or a NUL terminator
    #[error("document truncated at offset {position}: expected {expected}")]
    Truncated {
        position: usize,
        expected: &'static str,
    },

    /// Read requested outside a valid session state (caller bug)
    #[error("invalid read at offset {position}: {reason}")]
    Misuse {
        position: usize,
        reason: &'static str,
    },
}

impl DecodeError {
    /// Offset into the buffer where the error was raised
    pub fn position(&self) -> usize {
        match self {
            DecodeError::Malformed { position, .. }
            | DecodeError::Truncated { position, .. }
            | DecodeError::Misuse { position, .. } => *position,
        }
    }

    /// True for errors caused by the caller rather than by the data
    pub fn is_misuse(&self) -> bool {
        matches!(self, DecodeError::Misuse { .. })
    }
}

/// Failure while producing a document buffer
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Read(#[from] std::io::Error),

    #[error("document is empty")]
    Empty,

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("document is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },
}

/// Any error the crate can surface
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
