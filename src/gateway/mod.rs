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
//! The boundary between [`Buffer`] and the text codec / byte search engine.
//!
//! [`Buffer`] never transcodes strings or scans for patterns itself. Every
//! such request is routed through an [`EncodingGateway`] that the caller
//! passes in explicitly; there is no process-wide instance. [`Codec`] is the
//! implementation shipped with this crate.
//!
//! Gateways operate on plain slices. The window a request applies to is
//! expressed by the slice itself, so `offset`/`length` pairs never cross the
//! boundary.
//!
//! # Implementing a gateway
//!
//! Only the three string operations are required. The byte-level operations
//! have provided implementations that a gateway may replace with faster ones
//! (e.g. SIMD search), as long as the observable results are identical.
//!
//! ```
//! use rcbuffer::{gateway::EncodingGateway, Buffer, Codec, Encoding, Result};
//!
//! /// Delegates to `Codec` but counts every string that crosses the boundary.
//! #[derive(Default)]
//! struct Counting {
//!     inner: Codec,
//!     strings: core::cell::Cell<usize>,
//! }
//!
//! impl EncodingGateway for Counting {
//!     fn byte_length(&self, s: &str, encoding: Encoding) -> Result<usize> {
//!         self.inner.byte_length(s, encoding)
//!     }
//!
//!     fn encode_into(&self, dst: &mut [u8], s: &str, encoding: Encoding) -> Result<usize> {
//!         self.strings.set(self.strings.get() + 1);
//!         self.inner.encode_into(dst, s, encoding)
//!     }
//!
//!     fn decode(&self, src: &[u8], encoding: Encoding) -> Result<String> {
//!         self.strings.set(self.strings.get() + 1);
//!         self.inner.decode(src, encoding)
//!     }
//! }
//!
//! let gw = Counting::default();
//! let buf = Buffer::from_string(&gw, "hi", Encoding::Utf8).unwrap();
//! assert_eq!(buf.decode(&gw, Encoding::Hex, ..).unwrap(), "6869");
//! assert_eq!(gw.strings.get(), 2);
//! ```
//!
//! [`Buffer`]: crate::Buffer

use core::cmp::Ordering;

use alloc::string::String;

use crate::{Encoding, Result};

mod codec;
pub use self::codec::Codec;

/// Text codec and byte search operations consumed by [`Buffer`](crate::Buffer).
///
/// From the caller's perspective every method is stateless. Errors are
/// returned to the caller of the `Buffer` operation unchanged.
pub trait EncodingGateway {
    /// Number of bytes `s` occupies once encoded with `encoding`.
    ///
    /// May over-estimate for lenient encodings (e.g. base64 with embedded
    /// whitespace); [`encode_into`](Self::encode_into) reports the exact count.
    fn byte_length(&self, s: &str, encoding: Encoding) -> Result<usize>;

    /// Encodes as much of `s` as fits into `dst` and returns the number of
    /// bytes written. Never writes a partial character.
    fn encode_into(&self, dst: &mut [u8], s: &str, encoding: Encoding) -> Result<usize>;

    /// Decodes `src` into a string.
    fn decode(&self, src: &[u8], encoding: Encoding) -> Result<String>;

    /// Lexicographic byte comparison; a proper prefix orders first.
    fn compare_ranges(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }

    /// Sets every byte of `dst` to `value`.
    fn fill_byte(&self, dst: &mut [u8], value: u8) {
        for b in dst.iter_mut() {
            *b = value;
        }
    }

    /// Repeats `pattern` across `dst`, truncating the last repetition.
    /// An empty pattern leaves `dst` untouched.
    fn fill_pattern(&self, dst: &mut [u8], pattern: &[u8]) {
        if pattern.is_empty() {
            return;
        }
        for chunk in dst.chunks_mut(pattern.len()) {
            let n = chunk.len();
            chunk.copy_from_slice(&pattern[..n]);
        }
    }

    /// Index of the first `byte` in `haystack`.
    fn find_byte(&self, haystack: &[u8], byte: u8) -> Option<usize> {
        haystack.iter().position(|&b| b == byte)
    }

    /// Index of the last `byte` in `haystack`.
    fn rfind_byte(&self, haystack: &[u8], byte: u8) -> Option<usize> {
        haystack.iter().rposition(|&b| b == byte)
    }

    /// Start of the first occurrence of `needle`. An empty needle is never found.
    fn find_pattern(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > haystack.len() {
            return None;
        }
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Start of the last occurrence of `needle` lying entirely in `haystack`.
    /// An empty needle is never found.
    fn rfind_pattern(&self, haystack: &[u8], needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || needle.len() > haystack.len() {
            return None;
        }
        haystack.windows(needle.len()).rposition(|w| w == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Codec, EncodingGateway};
    use core::cmp::Ordering;

    #[test]
    fn pattern_fill_truncates() {
        let mut dst = [0u8; 7];
        Codec.fill_pattern(&mut dst, b"abc");
        assert_eq!(&dst, b"abcabca");
    }

    #[test]
    fn empty_pattern_is_noop() {
        let mut dst = [7u8; 3];
        Codec.fill_pattern(&mut dst, b"");
        assert_eq!(dst, [7, 7, 7]);
    }

    #[test]
    fn searches() {
        let hay = b"abcabc";
        assert_eq!(Codec.find_byte(hay, b'c'), Some(2));
        assert_eq!(Codec.rfind_byte(hay, b'c'), Some(5));
        assert_eq!(Codec.find_pattern(hay, b"bc"), Some(1));
        assert_eq!(Codec.rfind_pattern(hay, b"bc"), Some(4));
        assert_eq!(Codec.find_pattern(hay, b""), None);
        assert_eq!(Codec.rfind_pattern(hay, b"abcabcd"), None);
    }

    #[test]
    fn compare_prefix_orders_first() {
        assert_eq!(Codec.compare_ranges(b"ab", b"abc"), Ordering::Less);
        assert_eq!(Codec.compare_ranges(b"b", b"abc"), Ordering::Greater);
        assert_eq!(Codec.compare_ranges(b"", b""), Ordering::Equal);
    }
}
