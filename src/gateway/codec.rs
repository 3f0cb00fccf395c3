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
use core::char::{decode_utf16, REPLACEMENT_CHARACTER};
use core::cmp;

use alloc::{string::String, vec::Vec};

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use super::EncodingGateway;
use crate::{Encoding, Result};

/// Decoder used after input has been normalized to the standard alphabet
/// with padding stripped. Node tolerates non-zero trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// The self-contained [`EncodingGateway`] shipped with this crate.
///
/// `Codec` is zero-sized and stateless; construct one wherever a gateway is
/// needed.
///
/// ```
/// use rcbuffer::{gateway::EncodingGateway, Codec, Encoding};
///
/// let codec = Codec::new();
/// assert_eq!(codec.byte_length("aGVsbG8=", Encoding::Base64).unwrap(), 5);
/// assert_eq!(codec.decode(b"\xff", Encoding::Utf8).unwrap(), "\u{fffd}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec;

impl Codec {
    /// Creates a codec.
    pub const fn new() -> Codec {
        Codec
    }
}

impl EncodingGateway for Codec {
    fn byte_length(&self, s: &str, encoding: Encoding) -> Result<usize> {
        Ok(match encoding {
            Encoding::Utf8 => s.len(),
            Encoding::Hex => s.len() >> 1,
            Encoding::Base64 => base64_byte_length(s),
            Encoding::Latin1 | Encoding::Ascii => s.encode_utf16().count(),
            Encoding::Utf16Le => s.encode_utf16().count() * 2,
        })
    }

    fn encode_into(&self, dst: &mut [u8], s: &str, encoding: Encoding) -> Result<usize> {
        Ok(match encoding {
            Encoding::Utf8 => {
                let mut n = cmp::min(dst.len(), s.len());
                while !s.is_char_boundary(n) {
                    n -= 1;
                }
                dst[..n].copy_from_slice(&s.as_bytes()[..n]);
                n
            }
            Encoding::Hex => {
                let mut written = 0;
                for (slot, pair) in dst.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
                    let mut byte = [0u8; 1];
                    if hex::decode_to_slice(pair, &mut byte).is_err() {
                        break;
                    }
                    *slot = byte[0];
                    written += 1;
                }
                written
            }
            Encoding::Base64 => {
                let decoded = decode_base64(s);
                let n = cmp::min(dst.len(), decoded.len());
                dst[..n].copy_from_slice(&decoded[..n]);
                n
            }
            Encoding::Latin1 | Encoding::Ascii => {
                let mut written = 0;
                for (slot, unit) in dst.iter_mut().zip(s.encode_utf16()) {
                    *slot = unit as u8;
                    written += 1;
                }
                written
            }
            Encoding::Utf16Le => {
                let mut written = 0;
                for (slot, unit) in dst.chunks_exact_mut(2).zip(s.encode_utf16()) {
                    slot.copy_from_slice(&unit.to_le_bytes());
                    written += 2;
                }
                written
            }
        })
    }

    fn decode(&self, src: &[u8], encoding: Encoding) -> Result<String> {
        Ok(match encoding {
            Encoding::Utf8 => String::from_utf8_lossy(src).into_owned(),
            Encoding::Hex => hex::encode(src),
            Encoding::Base64 => STANDARD.encode(src),
            Encoding::Latin1 => src.iter().map(|&b| char::from(b)).collect(),
            Encoding::Ascii => src
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Encoding::Utf16Le => decode_utf16(
                src.chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            )
            .map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
            .collect(),
        })
    }
}

fn base64_byte_length(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut len = bytes.len();
    if len > 0 && bytes[len - 1] == b'=' {
        len -= 1;
    }
    if len > 1 && bytes[len - 1] == b'=' {
        len -= 1;
    }
    (len * 3) >> 2
}

// Accepts both alphabets, skips whitespace and stray characters, and stops
// at the first padding character.
fn decode_base64(s: &str) -> Vec<u8> {
    let mut clean = Vec::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' => clean.push(b),
            b'-' => clean.push(b'+'),
            b'_' => clean.push(b'/'),
            b'=' => break,
            _ => {}
        }
    }
    // a lone trailing sextet cannot form a byte
    if clean.len() % 4 == 1 {
        clean.pop();
    }
    match LENIENT.decode(&clean) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(%err, "base64 input rejected after normalization");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(s: &str, enc: Encoding) -> Vec<u8> {
        let mut dst = alloc::vec![0u8; Codec.byte_length(s, enc).unwrap()];
        let n = Codec.encode_into(&mut dst, s, enc).unwrap();
        dst.truncate(n);
        dst
    }

    #[test]
    fn utf8_never_splits_a_char() {
        let mut dst = [0u8; 2];
        assert_eq!(Codec.encode_into(&mut dst, "a€", Encoding::Utf8).unwrap(), 1);
        assert_eq!(dst[0], b'a');
    }

    #[test]
    fn utf8_decode_replaces_ill_formed_input() {
        // overlong '/'
        assert_eq!(Codec.decode(b"\xc0\xaf", Encoding::Utf8).unwrap(), "\u{fffd}\u{fffd}");
        // encoded surrogate U+D800
        assert_eq!(
            Codec.decode(b"\xed\xa0\x80", Encoding::Utf8).unwrap(),
            "\u{fffd}\u{fffd}\u{fffd}"
        );
        // truncated sequence is one maximal subpart
        assert_eq!(Codec.decode(b"\xe2\x82", Encoding::Utf8).unwrap(), "\u{fffd}");
        assert_eq!(Codec.decode("héllo".as_bytes(), Encoding::Utf8).unwrap(), "héllo");
    }

    #[test]
    fn hex_stops_at_first_invalid_pair() {
        assert_eq!(encode("0aff", Encoding::Hex), alloc::vec![0x0a, 0xff]);
        assert_eq!(encode("0azz11", Encoding::Hex), alloc::vec![0x0a]);
        assert_eq!(encode("abc", Encoding::Hex), alloc::vec![0xab]);
        assert_eq!(Codec.decode(&[0xde, 0xad], Encoding::Hex).unwrap(), "dead");
    }

    #[test]
    fn base64_is_lenient() {
        assert_eq!(encode("aGVsbG8=", Encoding::Base64), b"hello".to_vec());
        assert_eq!(encode("aGVs bG8", Encoding::Base64), b"hello".to_vec());
        assert_eq!(encode("_-8", Encoding::Base64), alloc::vec![0xff, 0xef]);
        assert_eq!(Codec.decode(b"hello", Encoding::Base64).unwrap(), "aGVsbG8=");
        assert_eq!(Codec.byte_length("", Encoding::Base64).unwrap(), 0);
        assert_eq!(Codec.byte_length("YQ==", Encoding::Base64).unwrap(), 1);
    }

    #[test]
    fn latin1_and_ascii() {
        assert_eq!(encode("\u{e9}\u{100}", Encoding::Latin1), alloc::vec![0xe9, 0x00]);
        assert_eq!(Codec.decode(&[0x61, 0xe9], Encoding::Latin1).unwrap(), "a\u{e9}");
        assert_eq!(Codec.decode(&[0x61, 0xe9], Encoding::Ascii).unwrap(), "a\u{fffd}");
    }

    #[test]
    fn utf16le() {
        assert_eq!(encode("a\u{1f600}", Encoding::Utf16Le), alloc::vec![0x61, 0, 0x3d, 0xd8, 0x00, 0xde]);
        assert_eq!(Codec.decode(&[0x61, 0, 0x62], Encoding::Utf16Le).unwrap(), "a");
        assert_eq!(Codec.decode(&[0x00, 0xd8], Encoding::Utf16Le).unwrap(), "\u{fffd}");
        let mut dst = [0u8; 3];
        assert_eq!(Codec.encode_into(&mut dst, "ab", Encoding::Utf16Le).unwrap(), 2);
    }
}
