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

use rcbuffer::Buffer;

#[test]
fn iter_len() {
    let buf = Buffer::from_bytes(b"hello world").unwrap();
    let iter = buf.iter();

    assert_eq!(iter.size_hint(), (11, Some(11)));
    assert_eq!(iter.len(), 11);
}

#[test]
fn empty_iter_len() {
    let buf = Buffer::new();
    let iter = buf.iter();

    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.len(), 0);
}

#[test]
fn iter_respects_view_bounds() {
    let buf = Buffer::from_bytes(b"hello world").unwrap();
    let world = buf.subarray(Some(6), None);

    assert_eq!(world.iter().collect::<Vec<u8>>(), b"world");
    assert_eq!(world.iter().rev().collect::<Vec<u8>>(), b"dlrow");
}

#[test]
fn into_iter_returns_whole_view() {
    let buf = Buffer::from_bytes(b"abc").unwrap();
    let mut iter = buf.into_iter();

    assert_eq!(iter.next_back(), Some(b'c'));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.get_ref().len(), 3);
    assert_eq!(iter.into_inner(), &b"abc"[..]);
}

#[test]
fn iter_observes_aliased_writes() {
    let buf = Buffer::from_bytes(b"abc").unwrap();
    let alias = buf.slice(None, None);
    let mut iter = buf.iter();

    assert_eq!(iter.next(), Some(b'a'));
    alias.set(1, b'z').unwrap();
    assert_eq!(iter.next(), Some(b'z'));
}
