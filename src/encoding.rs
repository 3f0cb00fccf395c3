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
use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::Error;

/// A character encoding understood by the encoding gateway.
///
/// Parsing is case-insensitive and accepts the nine names Node accepts:
/// `utf8`, `utf-8`, `hex`, `base64`, `binary`, `latin1`, `ascii`, `utf16le`
/// and `ucs2`. Aliases collapse onto one variant (`binary` is [`Latin1`],
/// `ucs2` is [`Utf16Le`]).
///
/// ```
/// use rcbuffer::Encoding;
///
/// assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
/// assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Latin1);
/// assert!("utf7".parse::<Encoding>().is_err());
/// ```
///
/// [`Latin1`]: Encoding::Latin1
/// [`Utf16Le`]: Encoding::Utf16Le
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8. The default everywhere an encoding is optional.
    Utf8,
    /// Two lowercase hexadecimal digits per byte.
    Hex,
    /// RFC 4648 base64.
    Base64,
    /// One byte per UTF-16 code unit, keeping the low 8 bits.
    Latin1,
    /// Like `Latin1` when encoding; bytes above `0x7f` decode to U+FFFD.
    Ascii,
    /// UTF-16 code units, little-endian.
    Utf16Le,
}

impl Encoding {
    /// Returns `true` if `name` is a recognized encoding name.
    pub fn is_encoding(name: &str) -> bool {
        Encoding::lookup(name).is_some()
    }

    /// Canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Utf16Le => "utf16le",
        }
    }

    fn lookup(name: &str) -> Option<Encoding> {
        const NAMES: [(&str, Encoding); 9] = [
            ("utf8", Encoding::Utf8),
            ("utf-8", Encoding::Utf8),
            ("hex", Encoding::Hex),
            ("base64", Encoding::Base64),
            ("binary", Encoding::Latin1),
            ("latin1", Encoding::Latin1),
            ("ascii", Encoding::Ascii),
            ("utf16le", Encoding::Utf16Le),
            ("ucs2", Encoding::Utf16Le),
        ];

        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, enc)| enc)
    }
}

impl Default for Encoding {
    fn default() -> Encoding {
        Encoding::Utf8
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Encoding, Error> {
        Encoding::lookup(name).ok_or_else(|| Error::UnknownEncoding(name.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Encoding;
    use crate::ErrorKind;

    #[test]
    fn every_name_parses() {
        for name in [
            "utf8", "utf-8", "hex", "base64", "binary", "latin1", "ascii", "utf16le", "ucs2",
        ]
        .iter()
        {
            assert!(Encoding::is_encoding(name), "{}", name);
            assert!(Encoding::is_encoding(&name.to_uppercase()), "{}", name);
        }
    }

    #[test]
    fn unknown_name() {
        let err = "utf-16".parse::<Encoding>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
        assert!(!Encoding::is_encoding(""));
    }

    #[test]
    fn round_trips_canonical_name() {
        for enc in [
            Encoding::Utf8,
            Encoding::Hex,
            Encoding::Base64,
            Encoding::Latin1,
            Encoding::Ascii,
            Encoding::Utf16Le,
        ]
        .iter()
        {
            assert_eq!(enc.as_str().parse::<Encoding>().unwrap(), *enc);
        }
    }
}
