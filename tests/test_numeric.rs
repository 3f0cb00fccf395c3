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
#![warn(rust_2018_idioms)]

use rcbuffer::{Buffer, Error, ErrorKind};

#[test]
fn fixed_width_layout() {
    let buf = Buffer::alloc(8).unwrap();

    assert_eq!(buf.write_u16_be(0x0102, 0).unwrap(), 2);
    assert_eq!(buf.write_u16_le(0x0304, 2).unwrap(), 4);
    assert_eq!(buf.to_vec(), [1, 2, 4, 3, 0, 0, 0, 0]);

    assert_eq!(buf.write_u32_le(0xdead_beef, 4).unwrap(), 8);
    assert_eq!(buf.read_u32_be(4).unwrap(), 0xefbe_adde);
    assert_eq!(buf.read_u8(0).unwrap(), 1);
    assert_eq!(buf.read_i8(7).unwrap(), -34);
}

#[test]
fn signed_and_float() {
    let buf = Buffer::alloc(8).unwrap();

    buf.write_i32_be(-2, 0).unwrap();
    assert_eq!(buf.read_i32_be(0).unwrap(), -2);
    assert_eq!(buf.read_u32_be(0).unwrap(), 0xffff_fffe);

    buf.write_f64_le(1.5, 0).unwrap();
    assert_eq!(buf.read_f64_le(0).unwrap(), 1.5);
    assert_eq!(buf.to_vec(), 1.5f64.to_le_bytes());

    buf.write_f32_be(-0.25, 4).unwrap();
    assert_eq!(buf.read_f32_be(4).unwrap(), -0.25);

    buf.write_i64_be(i64::MIN, 0).unwrap();
    assert_eq!(buf.read_i64_be(0).unwrap(), i64::MIN);
    assert_eq!(buf.read_u64_le(0).unwrap(), 0x80);
}

#[test]
fn out_of_bounds() {
    let buf = Buffer::alloc(4).unwrap();

    assert_eq!(
        buf.read_u32_le(1).unwrap_err(),
        Error::OutOfBounds {
            offset: 1,
            width: 4,
            len: 4
        }
    );
    assert_eq!(buf.write_u16_be(1, 3).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.read_u8(4).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.read_f64_be(usize::MAX).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.to_vec(), [0, 0, 0, 0]);
}

#[test]
fn bounds_follow_the_view() {
    let buf = Buffer::alloc(8).unwrap();
    let tail = buf.subarray(Some(6), None);

    assert!(tail.read_u32_le(0).is_err());
    tail.write_u16_le(0xabcd, 0).unwrap();
    assert_eq!(buf.read_u16_le(6).unwrap(), 0xabcd);
}

#[test]
fn variable_width_unsigned() {
    let buf = Buffer::alloc(6).unwrap();

    assert_eq!(buf.write_uint_be(0x1234_5678_90ab, 0, 6).unwrap(), 6);
    assert_eq!(buf.to_vec(), [0x12, 0x34, 0x56, 0x78, 0x90, 0xab]);
    assert_eq!(buf.read_uint_be(0, 6).unwrap(), 0x1234_5678_90ab);
    assert_eq!(buf.read_uint_le(0, 6).unwrap(), 0xab90_7856_3412);
    assert_eq!(buf.read_uint_be(1, 2).unwrap(), 0x3456);

    assert_eq!(buf.write_uint_le(0x0102_03, 3, 3).unwrap(), 6);
    assert_eq!(buf.to_vec()[3..], [0x03, 0x02, 0x01]);
}

#[test]
fn variable_width_signed() {
    let buf = Buffer::alloc(6).unwrap();

    buf.write_int_le(-1, 0, 3).unwrap();
    assert_eq!(buf.to_vec()[..3], [0xff, 0xff, 0xff]);
    assert_eq!(buf.read_int_le(0, 3).unwrap(), -1);

    buf.write_int_be(-129, 0, 2).unwrap();
    assert_eq!(buf.to_vec()[..2], [0xff, 0x7f]);
    assert_eq!(buf.read_int_be(0, 2).unwrap(), -129);

    buf.write_int_le(-256, 0, 2).unwrap();
    assert_eq!(buf.to_vec()[..2], [0x00, 0xff]);

    buf.write_int_be(0x7fff_ffff_ffff, 0, 6).unwrap();
    assert_eq!(buf.read_int_be(0, 6).unwrap(), 0x7fff_ffff_ffff);
    assert_eq!(buf.read_int_le(0, 1).unwrap(), 127);
}

#[test]
fn variable_width_zero_length() {
    let buf = Buffer::from_bytes(&[9, 9]).unwrap();

    assert_eq!(buf.read_uint_le(1, 0).unwrap(), 0);
    assert_eq!(buf.read_int_be(2, 0).unwrap(), 0);
    assert_eq!(buf.write_int_le(5, 1, 0).unwrap(), 1);
    assert_eq!(buf.write_uint_be(0, 2, 0).unwrap(), 2);
    assert_eq!(buf.to_vec(), [9, 9]);
}

#[test]
fn variable_width_validation() {
    let buf = Buffer::alloc(8).unwrap();

    assert_eq!(buf.read_uint_le(0, 7).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.write_int_be(0, 0, 7).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.write_uint_le(256, 0, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.write_int_le(-129, 0, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.write_int_le(128, 0, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.read_int_le(4, 5).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(buf.to_vec(), [0u8; 8]);
}
