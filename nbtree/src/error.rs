//! Contains the Error and Result type used throughout the crate.
use std::fmt::Display;

use crate::Tag;

/// Errors raised by the tag model, the codecs and the container layer.
///
/// Lookups that miss are not errors; they return `None`. Unknown tag ids
/// during decode are not errors either, they produce an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to
    /// new variants.
    Other,

    /// Element access on a list or array outside of its bounds.
    IndexOutOfRange { index: usize, len: usize },

    /// A value of one tag was given to a list holding another.
    KindMismatch { expected: Tag, found: Tag },

    /// A string or collection length does not fit the length field of the
    /// encoding, or exceeds the configured decode limit.
    LengthTooLarge,

    /// The input ran out part way through a value. Only raised when
    /// decoding in strict mode.
    UnexpectedEof,

    /// Compounds and lists were nested deeper than the decode limit.
    DepthLimit,

    /// The underlying reader or writer failed.
    Io(std::io::ErrorKind),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            msg: format!("index out of range: the len is {} but the index is {}", len, index),
            kind: ErrorKind::IndexOutOfRange { index, len },
        }
    }

    pub(crate) fn kind_mismatch(expected: Tag, found: Tag) -> Self {
        Self {
            msg: format!("list holds {} but was given {}", expected, found),
            kind: ErrorKind::KindMismatch { expected, found },
        }
    }

    pub(crate) fn length_too_large(len: usize, max: usize) -> Self {
        Self {
            msg: format!("length {} exceeds maximum of {}", len, max),
            kind: ErrorKind::LengthTooLarge,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn depth_limit(max: usize) -> Self {
        Self {
            msg: format!("nbt nested deeper than {} levels", max),
            kind: ErrorKind::DepthLimit,
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self {
            msg: format!("io error: {}", e),
            kind: ErrorKind::Io(e.kind()),
        }
    }
}
