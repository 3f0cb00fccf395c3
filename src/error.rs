// The code in this file is heavily based on [Carl Lerche's LRU implementation](https://github.com/tokio-rs/bytes).
//
// MIT License
//
// Copyright (c) 2022 Al Liu (https://github.com/al8n/rcbytes)
//
// Copyright (c) 2018 Carl Lerche (https://github.com/tokio-rs/bytes)
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//! Error type shared by every fallible buffer operation.
//!
//! Failures fall into three categories, mirroring the JavaScript error
//! classes Node raises for the same conditions:
//!
//! - [`ErrorKind::Type`]: an argument has the wrong shape.
//! - [`ErrorKind::Range`]: an offset, length, size or value is out of bounds.
//! - [`ErrorKind::Encoding`]: an encoding name is not recognized.
//!
//! All of them are raised synchronously, before any byte is mutated.

use alloc::{borrow::Cow, string::String};

use crate::Encoding;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong input shape or type (`TypeError` in Node).
    Type,
    /// Offset, length or size outside the valid bounds (`RangeError` in Node).
    Range,
    /// Unrecognized or mismatched encoding name.
    Encoding,
}

/// Errors returned by [`Buffer`](crate::Buffer) and the encoding gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An access of `width` bytes at `offset` does not fit in `len` bytes.
    #[error("attempt to access memory outside buffer bounds: offset {offset} + {width} > {len}")]
    OutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Width of the access in bytes.
        width: usize,
        /// Length of the view.
        len: usize,
    },
    /// A named argument is outside its accepted range.
    #[error("the value of \"{name}\" is out of range. It must be {expected}. Received {received}")]
    OutOfRange {
        /// Argument name.
        name: &'static str,
        /// Human readable description of the accepted range.
        expected: Cow<'static, str>,
        /// Rendering of the rejected value.
        received: String,
    },
    /// An allocation request exceeds [`K_MAX_LENGTH`](crate::K_MAX_LENGTH).
    #[error("array buffer allocation failed: {size} bytes exceeds the maximum of {max}")]
    TooLarge {
        /// Requested size.
        size: usize,
        /// Maximum permitted size.
        max: usize,
    },
    /// A string would exceed [`K_STRING_MAX_LENGTH`](crate::K_STRING_MAX_LENGTH).
    #[error("cannot create a string longer than {max} characters")]
    StringTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The view length is not a multiple of the swap group size.
    #[error("buffer size must be a multiple of {bits}-bits")]
    InvalidSwapSize {
        /// Group size in bits (16, 32 or 64).
        bits: usize,
    },
    /// An argument has an unsupported shape.
    #[error("{0}")]
    InvalidArgType(String),
    /// The encoding name is not one of the supported encodings.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
    /// The gateway cannot perform the operation for this encoding.
    #[error("encoding {encoding} is not supported by this gateway")]
    UnsupportedEncoding {
        /// Rejected encoding.
        encoding: Encoding,
    },
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfBounds { .. }
            | Error::OutOfRange { .. }
            | Error::TooLarge { .. }
            | Error::StringTooLong { .. }
            | Error::InvalidSwapSize { .. } => ErrorKind::Range,
            Error::InvalidArgType(_) => ErrorKind::Type,
            Error::UnknownEncoding(_) | Error::UnsupportedEncoding { .. } => ErrorKind::Encoding,
        }
    }

    pub(crate) fn out_of_range(
        name: &'static str,
        expected: impl Into<Cow<'static, str>>,
        received: impl core::fmt::Display,
    ) -> Error {
        Error::OutOfRange {
            name,
            expected: expected.into(),
            received: alloc::format!("{}", received),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn kinds() {
        let e = Error::OutOfBounds {
            offset: 3,
            width: 2,
            len: 4,
        };
        assert_eq!(e.kind(), ErrorKind::Range);
        assert_eq!(
            e.to_string(),
            "attempt to access memory outside buffer bounds: offset 3 + 2 > 4"
        );
        assert_eq!(
            Error::InvalidArgType("nope".into()).kind(),
            ErrorKind::Type
        );
        assert_eq!(
            Error::UnknownEncoding("utf7".into()).kind(),
            ErrorKind::Encoding
        );
    }
}
