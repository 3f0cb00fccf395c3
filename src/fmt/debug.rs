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
use core::fmt::{Debug, Formatter, Result};

use super::BytesRef;
use crate::{Buffer, INSPECT_MAX_BYTES};

/// Alternative implementation of `std::fmt::Debug` for byte slice.
///
/// Standard `Debug` implementation for `[u8]` is comma separated
/// list of numbers. Since large amount of byte strings are in fact
/// ASCII strings or contain a lot of ASCII strings (e. g. HTTP),
/// it is convenient to print strings as ASCII when possible.
impl Debug for BytesRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "b\"")?;
        for &b in self.0 {
            // https://doc.rust-lang.org/reference/tokens.html#byte-escapes
            if b == b'\n' {
                write!(f, "\\n")?;
            } else if b == b'\r' {
                write!(f, "\\r")?;
            } else if b == b'\t' {
                write!(f, "\\t")?;
            } else if b == b'\\' || b == b'"' {
                write!(f, "\\{}", b as char)?;
            } else if b == b'\0' {
                write!(f, "\\0")?;
            // ASCII printable
            } else if (0x20..0x7f).contains(&b) {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        write!(f, "\"")?;
        Ok(())
    }
}

/// Renders like Node's `util.inspect`: `<Buffer 68 69>`.
///
/// At most [`INSPECT_MAX_BYTES`] bytes are shown, followed by a count of the
/// elided remainder. The alternate form (`{:#?}`) prints the whole view as
/// an escaped byte string instead.
impl Debug for Buffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if f.alternate() {
            return Debug::fmt(&BytesRef(&self.to_vec()), f);
        }

        write!(f, "<Buffer")?;
        if self.is_empty() {
            write!(f, " ")?;
        }
        for b in self.iter().take(INSPECT_MAX_BYTES) {
            write!(f, " {:02x}", b)?;
        }
        let remaining = self.len().saturating_sub(INSPECT_MAX_BYTES);
        if remaining > 0 {
            write!(
                f,
                " ... {} more byte{}",
                remaining,
                if remaining > 1 { "s" } else { "" }
            )?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use crate::Buffer;
    use alloc::format;

    #[test]
    fn inspect_style() {
        let buf = Buffer::from_bytes(b"hello").unwrap();
        assert_eq!(format!("{:?}", buf), "<Buffer 68 65 6c 6c 6f>");
        assert_eq!(format!("{:?}", Buffer::new()), "<Buffer >");
    }

    #[test]
    fn elides_after_limit() {
        let buf = Buffer::alloc(51).unwrap();
        assert!(format!("{:?}", buf).ends_with(" 00 ... 1 more byte>"));
        let buf = Buffer::alloc(60).unwrap();
        assert!(format!("{:?}", buf).ends_with(" ... 10 more bytes>"));
    }

    #[test]
    fn alternate_is_escaped_byte_string() {
        let buf = Buffer::from_bytes(b"a\n\xff").unwrap();
        assert_eq!(format!("{:#?}", buf), "b\"a\\n\\xff\"");
    }
}
