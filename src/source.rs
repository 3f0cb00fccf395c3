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
//! Inputs accepted by the polymorphic entry points of [`Buffer`].
//!
//! Node's `Buffer.from`, `buf.fill` and `buf.indexOf` inspect the runtime
//! type of their argument. Here the argument kinds are closed enums, so the
//! dispatch is a `match` and an unsupported kind is a compile error rather
//! than a `TypeError`.

use alloc::{borrow::Cow, vec::Vec};

use crate::gateway::EncodingGateway;
use crate::{Buffer, ByteStorage, Encoding, JsonDescriptor, Result};

/// What a new buffer can be created from (Node's `Buffer.from` family).
///
/// | variant   | result                                   |
/// |-----------|------------------------------------------|
/// | `Size`    | zero-filled storage                      |
/// | `Bytes`   | fresh copy                               |
/// | `View`    | fresh copy of the view's bytes           |
/// | `Storage` | alias of the storage, no copy            |
/// | `Str`     | fresh storage holding the encoded string |
/// | `Json`    | fresh copy of the descriptor's data      |
#[derive(Debug, Clone)]
pub enum BufferSource<'a> {
    /// A length.
    Size(usize),
    /// Existing bytes, copied.
    Bytes(&'a [u8]),
    /// Another buffer, copied.
    View(&'a Buffer),
    /// A region of existing storage, aliased.
    Storage {
        /// The storage to alias.
        storage: ByteStorage,
        /// Start of the window; defaults to 0.
        offset: Option<usize>,
        /// Length of the window; defaults to the rest of the storage.
        length: Option<usize>,
    },
    /// A string and the encoding to write it with.
    Str {
        /// The text.
        value: &'a str,
        /// How to encode it.
        encoding: Encoding,
    },
    /// The `{"type":"Buffer","data":[..]}` object produced by
    /// [`Buffer::to_json`].
    Json(JsonDescriptor),
}

impl Buffer {
    /// Creates a buffer from any [`BufferSource`].
    ///
    /// ```
    /// use rcbuffer::{Buffer, BufferSource, Codec, Encoding};
    ///
    /// let a = Buffer::from_source(&Codec, BufferSource::Str { value: "aGk=", encoding: Encoding::Base64 }).unwrap();
    /// let b = Buffer::from_source(&Codec, &b"hi"[..]).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn from_source<'a, G, S>(gw: &G, source: S) -> Result<Buffer>
    where
        G: EncodingGateway + ?Sized,
        S: Into<BufferSource<'a>>,
    {
        match source.into() {
            BufferSource::Size(size) => Buffer::from_size(size),
            BufferSource::Bytes(bytes) => Buffer::from_bytes(bytes),
            BufferSource::View(view) => Buffer::copy_bytes_from(view, None, None),
            BufferSource::Storage {
                storage,
                offset,
                length,
            } => Buffer::from_storage(storage, offset, length),
            BufferSource::Str { value, encoding } => Buffer::from_string(gw, value, encoding),
            BufferSource::Json(desc) => Buffer::from_json(desc),
        }
    }
}

impl From<usize> for BufferSource<'_> {
    fn from(size: usize) -> Self {
        BufferSource::Size(size)
    }
}

impl<'a> From<&'a [u8]> for BufferSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        BufferSource::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for BufferSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        BufferSource::Bytes(bytes)
    }
}

impl<'a> From<&'a Buffer> for BufferSource<'a> {
    fn from(view: &'a Buffer) -> Self {
        BufferSource::View(view)
    }
}

impl From<ByteStorage> for BufferSource<'_> {
    fn from(storage: ByteStorage) -> Self {
        BufferSource::Storage {
            storage,
            offset: None,
            length: None,
        }
    }
}

impl<'a> From<&'a str> for BufferSource<'a> {
    fn from(value: &'a str) -> Self {
        BufferSource::Str {
            value,
            encoding: Encoding::Utf8,
        }
    }
}

impl From<JsonDescriptor> for BufferSource<'_> {
    fn from(desc: JsonDescriptor) -> Self {
        BufferSource::Json(desc)
    }
}

/// The value argument of [`Buffer::fill`].
#[derive(Debug, Clone, Copy)]
pub enum FillValue<'a> {
    /// Only the low 8 bits are used.
    Number(i64),
    /// Encoded with the encoding passed alongside, then repeated.
    Str(&'a str),
    /// Repeated as-is.
    Bytes(&'a [u8]),
    /// The buffer's current bytes, repeated.
    Buffer(&'a Buffer),
}

/// The value argument of [`Buffer::index_of`] and friends.
#[derive(Debug, Clone, Copy)]
pub enum Needle<'a> {
    /// A single byte; only the low 8 bits are used.
    Number(i64),
    /// Encoded with the encoding passed alongside.
    Str(&'a str),
    /// A byte sequence.
    Bytes(&'a [u8]),
    /// The buffer's current bytes.
    Buffer(&'a Buffer),
}

/// A fill value or needle after string encoding.
pub(crate) enum Pattern<'a> {
    Byte(u8),
    Seq(Cow<'a, [u8]>),
}

impl<'a> From<FillValue<'a>> for Needle<'a> {
    fn from(value: FillValue<'a>) -> Self {
        match value {
            FillValue::Number(n) => Needle::Number(n),
            FillValue::Str(s) => Needle::Str(s),
            FillValue::Bytes(b) => Needle::Bytes(b),
            FillValue::Buffer(b) => Needle::Buffer(b),
        }
    }
}

impl<'a> FillValue<'a> {
    pub(crate) fn resolve<G>(self, gw: &G, encoding: Option<Encoding>) -> Result<Pattern<'a>>
    where
        G: EncodingGateway + ?Sized,
    {
        Needle::from(self).resolve(gw, encoding)
    }
}

impl<'a> Needle<'a> {
    pub(crate) fn resolve<G>(self, gw: &G, encoding: Option<Encoding>) -> Result<Pattern<'a>>
    where
        G: EncodingGateway + ?Sized,
    {
        Ok(match self {
            Needle::Number(n) => Pattern::Byte((n & 0xff) as u8),
            Needle::Str(s) => {
                let encoded = Buffer::from_string(gw, s, encoding.unwrap_or_default())?;
                Pattern::Seq(Cow::Owned(encoded.to_vec()))
            }
            Needle::Bytes(b) => Pattern::Seq(Cow::Borrowed(b)),
            // Snapshot, so the pattern stays stable if `b` aliases the target.
            Needle::Buffer(b) => Pattern::Seq(Cow::Owned(b.to_vec())),
        })
    }
}

macro_rules! impl_value_from {
    ($ty:ident) => {
        impl From<u8> for $ty<'_> {
            fn from(n: u8) -> Self {
                $ty::Number(i64::from(n))
            }
        }

        impl From<i32> for $ty<'_> {
            fn from(n: i32) -> Self {
                $ty::Number(i64::from(n))
            }
        }

        impl From<i64> for $ty<'_> {
            fn from(n: i64) -> Self {
                $ty::Number(n)
            }
        }

        impl<'a> From<&'a str> for $ty<'a> {
            fn from(s: &'a str) -> Self {
                $ty::Str(s)
            }
        }

        impl<'a> From<&'a [u8]> for $ty<'a> {
            fn from(b: &'a [u8]) -> Self {
                $ty::Bytes(b)
            }
        }

        impl<'a, const N: usize> From<&'a [u8; N]> for $ty<'a> {
            fn from(b: &'a [u8; N]) -> Self {
                $ty::Bytes(b)
            }
        }

        impl<'a> From<&'a Vec<u8>> for $ty<'a> {
            fn from(b: &'a Vec<u8>) -> Self {
                $ty::Bytes(b)
            }
        }

        impl<'a> From<&'a Buffer> for $ty<'a> {
            fn from(b: &'a Buffer) -> Self {
                $ty::Buffer(b)
            }
        }
    };
}

impl_value_from!(FillValue);
impl_value_from!(Needle);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Codec;

    fn bytes(p: Pattern<'_>) -> Vec<u8> {
        match p {
            Pattern::Byte(b) => alloc::vec![b],
            Pattern::Seq(s) => s.into_owned(),
        }
    }

    #[test]
    fn numbers_wrap_to_a_byte() {
        let p = FillValue::from(257i64).resolve(&Codec, None).unwrap();
        assert_eq!(bytes(p), [1]);
        let p = Needle::from(-1i32).resolve(&Codec, None).unwrap();
        assert_eq!(bytes(p), [0xff]);
    }

    #[test]
    fn strings_use_the_given_encoding() {
        let p = Needle::from("6869").resolve(&Codec, Some(Encoding::Hex)).unwrap();
        assert_eq!(bytes(p), b"hi");
        let p = Needle::from("6869").resolve(&Codec, None).unwrap();
        assert_eq!(bytes(p), b"6869");
    }

    #[test]
    fn size_source_is_zeroed() {
        let buf = Buffer::from_source(&Codec, 3usize).unwrap();
        assert_eq!(buf, &[0u8, 0, 0][..]);
    }

    #[test]
    fn storage_source_aliases() {
        let storage = ByteStorage::zeroed(4).unwrap();
        let buf = Buffer::from_source(&Codec, storage.clone()).unwrap();
        buf.set(1, 5).unwrap();
        assert_eq!(storage.to_vec(), [0, 5, 0, 0]);
    }

    #[test]
    fn view_source_copies() {
        let a = Buffer::from_bytes(b"ab").unwrap();
        let b = Buffer::from_source(&Codec, &a).unwrap();
        b.set(0, b'z').unwrap();
        assert_eq!(a, &b"ab"[..]);
    }
}
