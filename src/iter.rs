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
//! Iterators over the bytes of a [`Buffer`].

use crate::Buffer;

/// Owning iterator over the bytes of a [`Buffer`].
///
/// This struct is created by the `into_iter` method on [`Buffer`]. Bytes are
/// read one at a time from the storage, so writes made through an aliasing
/// view while iterating are observed.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// use rcbuffer::Buffer;
///
/// let buf = Buffer::from_bytes(b"abc").unwrap();
/// let mut iter = buf.into_iter();
///
/// assert_eq!(iter.next(), Some(b'a'));
/// assert_eq!(iter.next(), Some(b'b'));
/// assert_eq!(iter.next(), Some(b'c'));
/// assert_eq!(iter.next(), None);
/// ```
#[derive(Debug)]
pub struct IntoIter {
    inner: Buffer,
    pos: usize,
    end: usize,
}

impl IntoIter {
    pub(crate) fn new(inner: Buffer) -> IntoIter {
        let end = inner.len();
        IntoIter { inner, pos: 0, end }
    }

    /// Consumes this `IntoIter`, returning the underlying buffer.
    ///
    /// The whole view is returned, including bytes already yielded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(b"abc").unwrap();
    /// let mut iter = buf.into_iter();
    ///
    /// assert_eq!(iter.next(), Some(b'a'));
    ///
    /// let buf = iter.into_inner();
    /// assert_eq!(3, buf.len());
    /// ```
    pub fn into_inner(self) -> Buffer {
        self.inner
    }

    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &Buffer {
        &self.inner
    }
}

impl Iterator for IntoIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos == self.end {
            return None;
        }
        let b = self.inner.get(self.pos);
        self.pos += 1;
        b
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.end - self.pos;
        (rem, Some(rem))
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<u8> {
        if self.pos == self.end {
            return None;
        }
        self.end -= 1;
        self.inner.get(self.end)
    }
}

impl ExactSizeIterator for IntoIter {}

/// Borrowing iterator over the bytes of a [`Buffer`].
///
/// This struct is created by [`Buffer::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: &'a Buffer,
    pos: usize,
    end: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(inner: &'a Buffer) -> Iter<'a> {
        Iter {
            inner,
            pos: 0,
            end: inner.len(),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.pos == self.end {
            return None;
        }
        let b = self.inner.get(self.pos);
        self.pos += 1;
        b
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.end - self.pos;
        (rem, Some(rem))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u8> {
        if self.pos == self.end {
            return None;
        }
        self.end -= 1;
        self.inner.get(self.end)
    }
}

impl ExactSizeIterator for Iter<'_> {}
