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
//! Fixed- and variable-width numeric accessors.
//!
//! Reads fail with [`Error::OutOfBounds`] unless `offset + width <= len`.
//! Writes perform the same check, validate the value where the type does not
//! already, and return `offset + width` so calls can be chained.

use crate::{Buffer, Error, Result};

macro_rules! fixed_width {
    ($(($ty:ty, $read_le:ident, $read_be:ident, $write_le:ident, $write_be:ident)),* $(,)?) => {
        impl Buffer {
            $(
                #[doc = concat!("Reads a little-endian `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $read_le(&self, offset: usize) -> Result<$ty> {
                    self.read_array(offset).map(<$ty>::from_le_bytes)
                }

                #[doc = concat!("Reads a big-endian `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $read_be(&self, offset: usize) -> Result<$ty> {
                    self.read_array(offset).map(<$ty>::from_be_bytes)
                }

                #[doc = concat!("Writes `value` as a little-endian `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $write_le(&self, value: $ty, offset: usize) -> Result<usize> {
                    self.write_array(offset, value.to_le_bytes())
                }

                #[doc = concat!("Writes `value` as a big-endian `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $write_be(&self, value: $ty, offset: usize) -> Result<usize> {
                    self.write_array(offset, value.to_be_bytes())
                }
            )*
        }
    };
}

fixed_width! {
    (u16, read_u16_le, read_u16_be, write_u16_le, write_u16_be),
    (i16, read_i16_le, read_i16_be, write_i16_le, write_i16_be),
    (u32, read_u32_le, read_u32_be, write_u32_le, write_u32_be),
    (i32, read_i32_le, read_i32_be, write_i32_le, write_i32_be),
    (u64, read_u64_le, read_u64_be, write_u64_le, write_u64_be),
    (i64, read_i64_le, read_i64_be, write_i64_le, write_i64_be),
    (f32, read_f32_le, read_f32_be, write_f32_le, write_f32_be),
    (f64, read_f64_le, read_f64_be, write_f64_le, write_f64_be),
}

/// Largest width accepted by the variable-width accessors.
const MAX_VAR_WIDTH: usize = 6;

impl Buffer {
    /// Reads the byte at `offset`.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        self.read_array::<1>(offset).map(|b| b[0])
    }

    /// Reads the byte at `offset` as a two's complement `i8`.
    #[inline]
    pub fn read_i8(&self, offset: usize) -> Result<i8> {
        self.read_array::<1>(offset).map(|b| b[0] as i8)
    }

    /// Writes `value` at `offset`.
    #[inline]
    pub fn write_u8(&self, value: u8, offset: usize) -> Result<usize> {
        self.write_array(offset, [value])
    }

    /// Writes `value` at `offset` in two's complement.
    #[inline]
    pub fn write_i8(&self, value: i8, offset: usize) -> Result<usize> {
        self.write_array(offset, [value as u8])
    }

    /// Reads an unsigned little-endian integer of `byte_length` bytes
    /// (0 to 6).
    ///
    /// A `byte_length` of 0 reads nothing and returns 0.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(&[0x12, 0x34, 0x56]).unwrap();
    /// assert_eq!(buf.read_uint_le(0, 3).unwrap(), 0x563412);
    /// assert_eq!(buf.read_uint_be(0, 3).unwrap(), 0x123456);
    /// ```
    pub fn read_uint_le(&self, offset: usize, byte_length: usize) -> Result<u64> {
        let bytes = self.read_var(offset, byte_length)?;
        Ok(bytes[..byte_length]
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads an unsigned big-endian integer of `byte_length` bytes (0 to 6).
    pub fn read_uint_be(&self, offset: usize, byte_length: usize) -> Result<u64> {
        let bytes = self.read_var(offset, byte_length)?;
        Ok(bytes[..byte_length]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads a two's complement little-endian integer of `byte_length`
    /// bytes (0 to 6).
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(&[0xff, 0xff, 0xff]).unwrap();
    /// assert_eq!(buf.read_int_le(0, 3).unwrap(), -1);
    /// ```
    pub fn read_int_le(&self, offset: usize, byte_length: usize) -> Result<i64> {
        let raw = self.read_uint_le(offset, byte_length)?;
        Ok(sign_extend(raw, byte_length))
    }

    /// Reads a two's complement big-endian integer of `byte_length` bytes
    /// (0 to 6).
    pub fn read_int_be(&self, offset: usize, byte_length: usize) -> Result<i64> {
        let raw = self.read_uint_be(offset, byte_length)?;
        Ok(sign_extend(raw, byte_length))
    }

    /// Writes `value` as an unsigned little-endian integer of `byte_length`
    /// bytes (0 to 6).
    ///
    /// # Errors
    ///
    /// Fails with a range error if `value` does not fit in `byte_length`
    /// bytes or the write is out of bounds.
    pub fn write_uint_le(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        check_width(byte_length)?;
        let max = unsigned_max(byte_length);
        if value > max {
            return Err(Error::out_of_range(
                "value",
                range_text(0, max as i64),
                value,
            ));
        }
        let mut bytes = [0u8; MAX_VAR_WIDTH];
        for (i, b) in bytes[..byte_length].iter_mut().enumerate() {
            *b = (value >> (8 * i)) as u8;
        }
        self.write_from(offset, &bytes[..byte_length])
    }

    /// Writes `value` as an unsigned big-endian integer of `byte_length`
    /// bytes (0 to 6).
    pub fn write_uint_be(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        check_width(byte_length)?;
        let max = unsigned_max(byte_length);
        if value > max {
            return Err(Error::out_of_range(
                "value",
                range_text(0, max as i64),
                value,
            ));
        }
        let mut bytes = [0u8; MAX_VAR_WIDTH];
        for (i, b) in bytes[..byte_length].iter_mut().rev().enumerate() {
            *b = (value >> (8 * i)) as u8;
        }
        self.write_from(offset, &bytes[..byte_length])
    }

    /// Writes `value` as a two's complement little-endian integer of
    /// `byte_length` bytes (0 to 6).
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::alloc(6).unwrap();
    /// assert_eq!(buf.write_int_le(-0x1234_5678_90ab, 0, 6).unwrap(), 6);
    /// assert_eq!(buf.read_int_le(0, 6).unwrap(), -0x1234_5678_90ab);
    /// assert!(buf.write_int_le(128, 0, 1).is_err());
    /// ```
    pub fn write_int_le(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        let mut bytes = signed_bytes(value, byte_length)?;
        bytes[..byte_length].reverse();
        self.write_from(offset, &bytes[..byte_length])
    }

    /// Writes `value` as a two's complement big-endian integer of
    /// `byte_length` bytes (0 to 6).
    pub fn write_int_be(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        let bytes = signed_bytes(value, byte_length)?;
        self.write_from(offset, &bytes[..byte_length])
    }

    fn read_var(&self, offset: usize, byte_length: usize) -> Result<[u8; MAX_VAR_WIDTH]> {
        check_width(byte_length)?;
        let mut bytes = [0u8; MAX_VAR_WIDTH];
        self.read_into(offset, &mut bytes[..byte_length])?;
        Ok(bytes)
    }
}

fn check_width(byte_length: usize) -> Result<()> {
    if byte_length > MAX_VAR_WIDTH {
        return Err(Error::out_of_range("byteLength", ">= 0 and <= 6", byte_length));
    }
    Ok(())
}

fn unsigned_max(byte_length: usize) -> u64 {
    (1u64 << (8 * byte_length)) - 1
}

fn sign_extend(raw: u64, byte_length: usize) -> i64 {
    if byte_length == 0 {
        return 0;
    }
    let bits = 8 * byte_length;
    if raw >= 1 << (bits - 1) {
        raw as i64 - (1i64 << bits)
    } else {
        raw as i64
    }
}

fn range_text(min: i64, max: i64) -> alloc::string::String {
    alloc::format!(">= {} and <= {}", min, max)
}

/// Big-endian two's complement bytes of `value`, least significant last.
///
/// Built one byte at a time, carrying a borrow once a non-zero byte has
/// been emitted for a negative value.
fn signed_bytes(value: i64, byte_length: usize) -> Result<[u8; MAX_VAR_WIDTH]> {
    check_width(byte_length)?;
    let mut bytes = [0u8; MAX_VAR_WIDTH];
    if byte_length == 0 {
        return Ok(bytes);
    }

    let bits = 8 * byte_length;
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    if value < min || value > max {
        return Err(Error::out_of_range("value", range_text(min, max), value));
    }

    // Least significant byte first, reversed below.
    let mut le = [0u8; MAX_VAR_WIDTH];
    le[0] = (value & 0xff) as u8;
    let mut mul = 1i64;
    let mut sub = 0i64;
    for i in 1..byte_length {
        mul *= 0x100;
        if value < 0 && sub == 0 && le[i - 1] != 0 {
            sub = 1;
        }
        le[i] = ((value / mul - sub) & 0xff) as u8;
    }

    for (dst, src) in bytes[..byte_length].iter_mut().zip(le[..byte_length].iter().rev()) {
        *dst = *src;
    }
    Ok(bytes)
}
