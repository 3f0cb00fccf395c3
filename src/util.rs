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
//! Free functions exported alongside `Buffer` by Node's `buffer` module.

use alloc::string::String;

use crate::gateway::EncodingGateway;
use crate::{Buffer, Encoding, Result};

/// Decodes base64 `data` to a string with one character per byte.
///
/// ```
/// use rcbuffer::{util, Codec};
///
/// assert_eq!(util::atob(&Codec, "aGVsbG8=").unwrap(), "hello");
/// ```
pub fn atob<G>(gw: &G, data: &str) -> Result<String>
where
    G: EncodingGateway + ?Sized,
{
    Buffer::from_string(gw, data, Encoding::Base64)?.decode(gw, Encoding::Latin1, ..)
}

/// Encodes `data` as base64, taking each character as one byte.
///
/// Characters above U+00FF keep only their low 8 bits.
///
/// ```
/// use rcbuffer::{util, Codec};
///
/// assert_eq!(util::btoa(&Codec, "hello").unwrap(), "aGVsbG8=");
/// ```
pub fn btoa<G>(gw: &G, data: &str) -> Result<String>
where
    G: EncodingGateway + ?Sized,
{
    Buffer::from_string(gw, data, Encoding::Latin1)?.decode(gw, Encoding::Base64, ..)
}

/// `true` if every byte of `input` is below `0x80`.
pub fn is_ascii(input: &Buffer) -> bool {
    input.iter().all(|b| b.is_ascii())
}

/// `true` if `input` is well-formed UTF-8.
pub fn is_utf8(input: &Buffer) -> bool {
    core::str::from_utf8(&input.to_vec()).is_ok()
}

/// Re-encodes the text in `source` from one encoding to another, returning
/// a fresh buffer.
///
/// ```
/// use rcbuffer::{util, Buffer, Codec, Encoding};
///
/// let utf8 = Buffer::from_bytes("€".as_bytes()).unwrap();
/// let utf16 = util::transcode(&Codec, &utf8, Encoding::Utf8, Encoding::Utf16Le).unwrap();
/// assert_eq!(utf16, &[0xac, 0x20][..]);
/// ```
pub fn transcode<G>(gw: &G, source: &Buffer, from: Encoding, to: Encoding) -> Result<Buffer>
where
    G: EncodingGateway + ?Sized,
{
    let text = source.decode(gw, from, ..)?;
    tracing::trace!(%from, %to, len = source.len(), "transcoding");
    Buffer::from_string(gw, &text, to)
}
