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
use core::cmp::{self, Ordering};
use core::convert::TryFrom;
use core::hash;
use core::ops::{Bound, RangeBounds};

use alloc::{string::String, vec, vec::Vec};

use crate::gateway::EncodingGateway;
use crate::iter::{IntoIter, Iter};
use crate::source::{FillValue, Needle, Pattern};
use crate::{ByteStorage, Encoding, Error, Result, K_STRING_MAX_LENGTH};

/// A fixed-length, mutable view over shared byte storage, with the semantics
/// of Node's `Buffer`.
///
/// A `Buffer` is a window `(storage, offset, len)` onto a [`ByteStorage`].
/// Several buffers may alias the same storage; [`subarray`] and [`slice`]
/// both produce such aliases, so a write through one is visible through the
/// other. Constructors that take existing bytes ([`from_bytes`],
/// [`copy_bytes_from`], [`concat`]) always copy into fresh storage.
///
/// Every access is bounds-checked against the view's own length, never
/// against the capacity of the storage behind it.
///
/// ```
/// use rcbuffer::{Buffer, Codec, Encoding};
///
/// let codec = Codec::new();
/// let buf = Buffer::from_string(&codec, "hello world", Encoding::Utf8).unwrap();
/// let hello = buf.slice(None, Some(5));
///
/// hello.set(0, b'j').unwrap();
/// assert_eq!(buf.decode(&codec, Encoding::Utf8, ..).unwrap(), "jello world");
/// ```
///
/// Mutation goes through `&self`, exactly like a JavaScript typed array.
/// `Buffer` is neither `Send` nor `Sync`; aliases can only be touched from
/// the thread that created them.
///
/// [`subarray`]: Buffer::subarray
/// [`slice`]: Buffer::slice
/// [`from_bytes`]: Buffer::from_bytes
/// [`copy_bytes_from`]: Buffer::copy_bytes_from
/// [`concat`]: Buffer::concat
#[derive(Clone)]
pub struct Buffer {
    storage: ByteStorage,
    offset: usize,
    len: usize,
}

impl Buffer {
    /// Creates an empty buffer over empty storage.
    pub fn new() -> Buffer {
        Buffer::from_storage_unchecked(ByteStorage::empty(), 0, 0)
    }

    pub(crate) fn from_storage_unchecked(storage: ByteStorage, offset: usize, len: usize) -> Buffer {
        debug_assert!(offset + len <= storage.capacity());
        Buffer {
            storage,
            offset,
            len,
        }
    }

    // ===== construction =====

    /// Allocates a zero-filled buffer of `size` bytes.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `size` exceeds [`K_MAX_LENGTH`](crate::K_MAX_LENGTH).
    pub fn from_size(size: usize) -> Result<Buffer> {
        let storage = ByteStorage::zeroed(size)?;
        Ok(Buffer::from_storage_unchecked(storage, 0, size))
    }

    /// Node's `Buffer.alloc(size)`: a zero-filled buffer.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::alloc(4).unwrap();
    /// assert_eq!(buf.to_vec(), [0, 0, 0, 0]);
    /// ```
    pub fn alloc(size: usize) -> Result<Buffer> {
        Buffer::from_size(size)
    }

    /// Node's `Buffer.alloc(size, fill, encoding)`.
    ///
    /// The storage is zeroed before `fill` is applied, so an empty fill
    /// pattern leaves zeroes behind.
    ///
    /// ```
    /// use rcbuffer::{Buffer, Codec};
    ///
    /// let buf = Buffer::alloc_with(&Codec, 5, "ab", None).unwrap();
    /// assert_eq!(buf, &b"ababa"[..]);
    /// ```
    pub fn alloc_with<'a, G, V>(
        gw: &G,
        size: usize,
        fill: V,
        encoding: Option<Encoding>,
    ) -> Result<Buffer>
    where
        G: EncodingGateway + ?Sized,
        V: Into<FillValue<'a>>,
    {
        let buf = Buffer::from_size(size)?;
        buf.fill(gw, fill, .., encoding)?;
        Ok(buf)
    }

    /// Node's `Buffer.allocUnsafe(size)`.
    ///
    /// Unlike Node, the contents are always zeroed: uninitialized memory is
    /// never observable through a `Buffer`.
    pub fn alloc_unsafe(size: usize) -> Result<Buffer> {
        Buffer::from_size(size)
    }

    /// Node's `Buffer.allocUnsafeSlow(size)`. Zeroed, like
    /// [`alloc_unsafe`](Buffer::alloc_unsafe).
    pub fn alloc_unsafe_slow(size: usize) -> Result<Buffer> {
        Buffer::from_size(size)
    }

    /// Copies `bytes` into a fresh buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Buffer> {
        Buffer::from_vec(bytes.to_vec())
    }

    /// Takes ownership of `vec` as the storage of a new buffer.
    pub fn from_vec(vec: Vec<u8>) -> Result<Buffer> {
        let len = vec.len();
        let storage = ByteStorage::from_vec(vec)?;
        Ok(Buffer::from_storage_unchecked(storage, 0, len))
    }

    /// Creates a view aliasing `storage`.
    ///
    /// `offset` defaults to 0 and `length` to the rest of the storage.
    ///
    /// # Errors
    ///
    /// Fails with a range error if the window does not fit in the storage.
    ///
    /// ```
    /// use rcbuffer::{Buffer, ByteStorage};
    ///
    /// let storage = ByteStorage::zeroed(8).unwrap();
    /// let a = Buffer::from_storage(storage.clone(), Some(2), Some(4)).unwrap();
    /// let b = Buffer::from_storage(storage, None, None).unwrap();
    ///
    /// a.set(0, 7).unwrap();
    /// assert_eq!(b.get(2), Some(7));
    /// ```
    pub fn from_storage(
        storage: ByteStorage,
        offset: Option<usize>,
        length: Option<usize>,
    ) -> Result<Buffer> {
        let cap = storage.capacity();
        let offset = offset.unwrap_or(0);
        if offset > cap {
            return Err(Error::out_of_range("offset", "<= the storage capacity", offset));
        }
        let length = length.unwrap_or(cap - offset);
        if length > cap - offset {
            return Err(Error::out_of_range(
                "length",
                "<= the storage capacity minus offset",
                length,
            ));
        }
        tracing::trace!(offset, length, "aliasing existing storage");
        Ok(Buffer::from_storage_unchecked(storage, offset, length))
    }

    /// Encodes `s` into a fresh buffer.
    ///
    /// The storage is sized with [`EncodingGateway::byte_length`]. If the
    /// gateway writes fewer bytes (lenient decoders skip invalid input), the
    /// returned view is shortened to what was actually written.
    ///
    /// ```
    /// use rcbuffer::{Buffer, Codec, Encoding};
    ///
    /// let buf = Buffer::from_string(&Codec, "deadbeef", Encoding::Hex).unwrap();
    /// assert_eq!(buf, &[0xde, 0xad, 0xbe, 0xef][..]);
    /// ```
    pub fn from_string<G>(gw: &G, s: &str, encoding: Encoding) -> Result<Buffer>
    where
        G: EncodingGateway + ?Sized,
    {
        let length = Buffer::byte_length(gw, s, encoding)?;
        let mut scratch = vec![0u8; length];
        let written = gw.encode_into(&mut scratch, s, encoding).map_err(|err| {
            tracing::debug!(%err, %encoding, "gateway failed to encode string");
            err
        })?;
        scratch.truncate(written);
        Buffer::from_vec(scratch)
    }

    /// Node's `Buffer.byteLength(string, encoding)`.
    pub fn byte_length<G>(gw: &G, s: &str, encoding: Encoding) -> Result<usize>
    where
        G: EncodingGateway + ?Sized,
    {
        if s.len() > K_STRING_MAX_LENGTH {
            return Err(Error::StringTooLong {
                max: K_STRING_MAX_LENGTH,
            });
        }
        gw.byte_length(s, encoding).map_err(|err| {
            tracing::debug!(%err, %encoding, "gateway failed to measure string");
            err
        })
    }

    /// Copies `length` bytes of `view` starting at `offset` into fresh
    /// storage. The result never aliases `view`.
    ///
    /// `offset` defaults to 0 and `length` to the rest of the view.
    ///
    /// # Errors
    ///
    /// Fails with a range error if the window does not fit in `view`.
    pub fn copy_bytes_from(
        view: &Buffer,
        offset: Option<usize>,
        length: Option<usize>,
    ) -> Result<Buffer> {
        let offset = offset.unwrap_or(0);
        if offset > view.len {
            return Err(Error::out_of_range("offset", "<= view.length", offset));
        }
        let length = length.unwrap_or(view.len - offset);
        if length > view.len - offset {
            return Err(Error::out_of_range("length", "<= view.length - offset", length));
        }
        Buffer::from_vec(view.storage.copy_out(view.offset + offset, length))
    }

    /// Concatenates `list` into one fresh buffer.
    ///
    /// `total_length` defaults to the sum of the lengths. When it is
    /// smaller, copying stops after exactly `total_length` bytes; when it is
    /// larger, the tail stays zeroed.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let a = Buffer::from_bytes(b"ab").unwrap();
    /// let b = Buffer::from_bytes(b"cd").unwrap();
    /// assert_eq!(Buffer::concat(&[a.clone(), b.clone()], None).unwrap(), &b"abcd"[..]);
    /// assert_eq!(Buffer::concat(&[a, b], Some(3)).unwrap(), &b"abc"[..]);
    /// ```
    pub fn concat<'a, I>(list: I, total_length: Option<usize>) -> Result<Buffer>
    where
        I: IntoIterator<Item = &'a Buffer>,
    {
        let list: Vec<&Buffer> = list.into_iter().collect();
        let total = match total_length {
            Some(n) => n,
            None => list.iter().map(|b| b.len).sum(),
        };

        let out = Buffer::from_size(total)?;
        let mut pos = 0;
        for item in list {
            if pos == total {
                break;
            }
            let n = cmp::min(item.len, total - pos);
            ByteStorage::copy_between(&item.storage, item.offset, &out.storage, pos, n);
            pos += n;
        }
        Ok(out)
    }

    // ===== shape =====

    /// Number of bytes in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the view within its storage (Node's `byteOffset`).
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.offset
    }

    /// The storage behind this view (Node's `buffer` / `parent`).
    #[inline]
    pub fn storage(&self) -> &ByteStorage {
        &self.storage
    }

    /// Returns the byte at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.storage.get(self.offset + index))
        } else {
            None
        }
    }

    /// Sets the byte at `index`.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `index` is out of bounds.
    #[inline]
    pub fn set(&self, index: usize, value: u8) -> Result<()> {
        self.check_access(index, 1)?;
        self.storage.set(self.offset + index, value);
        Ok(())
    }

    /// Copies the view's bytes into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.storage.copy_out(self.offset, self.len)
    }

    /// Iterates over the bytes by value.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    // ===== aliasing views =====

    /// Returns a view of `[begin, end)` sharing this buffer's storage.
    ///
    /// Negative indices count from the end, out-of-range indices clamp, and
    /// `begin >= end` yields an empty view. Never copies.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(b"abcdef").unwrap();
    /// assert_eq!(buf.subarray(Some(-2), None), &b"ef"[..]);
    /// assert_eq!(buf.subarray(Some(1), Some(100)), &b"bcdef"[..]);
    /// assert!(buf.subarray(Some(4), Some(2)).is_empty());
    /// ```
    pub fn subarray(&self, begin: Option<isize>, end: Option<isize>) -> Buffer {
        let begin = begin.map_or(0, |i| relative_index(i, self.len));
        let end = end.map_or(self.len, |i| relative_index(i, self.len));
        let len = end.saturating_sub(begin);

        tracing::trace!(begin, len, "creating aliasing view");
        Buffer::from_storage_unchecked(self.storage.clone(), self.offset + begin, len)
    }

    /// Same as [`subarray`](Buffer::subarray): the result aliases this
    /// buffer. This deliberately differs from `Uint8Array.prototype.slice`,
    /// which copies.
    pub fn slice(&self, begin: Option<isize>, end: Option<isize>) -> Buffer {
        self.subarray(begin, end)
    }

    // ===== strings =====

    /// Encodes `s` into this buffer at `offset` and returns the number of
    /// bytes written (Node's `buf.write`).
    ///
    /// At most `length` bytes (default: the rest of the view) are written
    /// and partial characters are never written.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `offset` is past the end of the view, or
    /// with whatever the gateway reports.
    pub fn write_str<G>(
        &self,
        gw: &G,
        s: &str,
        offset: usize,
        length: Option<usize>,
        encoding: Encoding,
    ) -> Result<usize>
    where
        G: EncodingGateway + ?Sized,
    {
        if offset > self.len {
            return Err(Error::out_of_range("offset", "<= buf.length", offset));
        }
        let remaining = self.len - offset;
        let max = cmp::min(length.unwrap_or(remaining), remaining);

        let mut scratch = vec![0u8; max];
        let written = gw.encode_into(&mut scratch, s, encoding).map_err(|err| {
            tracing::debug!(%err, %encoding, "gateway failed to encode string");
            err
        })?;
        self.storage.write(self.offset + offset, &scratch[..written]);
        Ok(written)
    }

    /// Decodes the bytes in `range` (Node's `buf.toString`).
    ///
    /// The range is clamped to the view; an empty range yields `""`.
    ///
    /// # Errors
    ///
    /// Fails with a range error if the result would be longer than
    /// [`K_STRING_MAX_LENGTH`], or with whatever the gateway reports.
    pub fn decode<G>(&self, gw: &G, encoding: Encoding, range: impl RangeBounds<usize>) -> Result<String>
    where
        G: EncodingGateway + ?Sized,
    {
        let (start, end) = bounds(range, self.len);
        let end = cmp::min(end, self.len);
        if start >= end {
            return Ok(String::new());
        }

        let src = self.storage.copy_out(self.offset + start, end - start);
        let s = gw.decode(&src, encoding).map_err(|err| {
            tracing::debug!(%err, %encoding, "gateway failed to decode bytes");
            err
        })?;
        if s.len() > K_STRING_MAX_LENGTH && s.encode_utf16().count() > K_STRING_MAX_LENGTH {
            return Err(Error::StringTooLong {
                max: K_STRING_MAX_LENGTH,
            });
        }
        Ok(s)
    }

    // ===== search =====

    /// Position of the first occurrence of `value` at or after
    /// `byte_offset` (Node's `buf.indexOf`).
    ///
    /// `value` may be a byte (numbers are taken modulo 256), a byte sequence,
    /// another buffer or a string encoded with `encoding` (default utf8). A
    /// negative `byte_offset` counts from the end. An empty needle is never
    /// found.
    ///
    /// ```
    /// use rcbuffer::{Buffer, Codec};
    ///
    /// let buf = Buffer::from_bytes(b"this is a buffer").unwrap();
    /// assert_eq!(buf.index_of(&Codec, "is", None, None).unwrap(), Some(2));
    /// assert_eq!(buf.index_of(&Codec, "is", Some(3), None).unwrap(), Some(5));
    /// assert_eq!(buf.index_of(&Codec, 98, None, None).unwrap(), Some(10));
    /// assert_eq!(buf.index_of(&Codec, "", None, None).unwrap(), None);
    /// ```
    pub fn index_of<'a, G, N>(
        &self,
        gw: &G,
        value: N,
        byte_offset: Option<isize>,
        encoding: Option<Encoding>,
    ) -> Result<Option<usize>>
    where
        G: EncodingGateway + ?Sized,
        N: Into<Needle<'a>>,
    {
        let pattern = value.into().resolve(gw, encoding)?;

        let start = match byte_offset {
            None => 0,
            Some(off) => relative_index(off, self.len),
        };
        if start >= self.len {
            return Ok(None);
        }

        let haystack = self.storage.copy_out(self.offset + start, self.len - start);
        let found = match &pattern {
            Pattern::Byte(b) => gw.find_byte(&haystack, *b),
            Pattern::Seq(needle) if needle.is_empty() => None,
            Pattern::Seq(needle) => gw.find_pattern(&haystack, needle),
        };
        Ok(found.map(|i| i + start))
    }

    /// Position of the last occurrence of `value` starting at or before
    /// `byte_offset` (Node's `buf.lastIndexOf`).
    ///
    /// Without `byte_offset` the whole view is searched. A negative offset
    /// counts from the end; if it is still negative nothing is found.
    ///
    /// ```
    /// use rcbuffer::{Buffer, Codec};
    ///
    /// let buf = Buffer::from_bytes(b"abcabc").unwrap();
    /// assert_eq!(buf.last_index_of(&Codec, "bc", None, None).unwrap(), Some(4));
    /// assert_eq!(buf.last_index_of(&Codec, "bc", Some(3), None).unwrap(), Some(1));
    /// assert_eq!(buf.last_index_of(&Codec, b'a', Some(2), None).unwrap(), Some(0));
    /// ```
    pub fn last_index_of<'a, G, N>(
        &self,
        gw: &G,
        value: N,
        byte_offset: Option<isize>,
        encoding: Option<Encoding>,
    ) -> Result<Option<usize>>
    where
        G: EncodingGateway + ?Sized,
        N: Into<Needle<'a>>,
    {
        let pattern = value.into().resolve(gw, encoding)?;

        let from = match byte_offset {
            None => self.len,
            Some(off) if off < 0 => match self.len.checked_sub(off.unsigned_abs()) {
                Some(from) => from,
                None => return Ok(None),
            },
            Some(off) => cmp::min(off as usize, self.len),
        };

        let needle_len = match &pattern {
            Pattern::Byte(_) => 1,
            Pattern::Seq(needle) if needle.is_empty() => return Ok(None),
            Pattern::Seq(needle) => needle.len(),
        };
        // Only matches starting at or before `from` fit in this window.
        let window = cmp::min(from.saturating_add(needle_len), self.len);

        let haystack = self.storage.copy_out(self.offset, window);
        Ok(match &pattern {
            Pattern::Byte(b) => gw.rfind_byte(&haystack, *b),
            Pattern::Seq(needle) => gw.rfind_pattern(&haystack, needle),
        })
    }

    /// `true` if [`index_of`](Buffer::index_of) finds `value`.
    pub fn includes<'a, G, N>(
        &self,
        gw: &G,
        value: N,
        byte_offset: Option<isize>,
        encoding: Option<Encoding>,
    ) -> Result<bool>
    where
        G: EncodingGateway + ?Sized,
        N: Into<Needle<'a>>,
    {
        Ok(self.index_of(gw, value, byte_offset, encoding)?.is_some())
    }

    // ===== compare =====

    /// Lexicographic comparison of the whole of both views.
    pub fn compare<G>(&self, gw: &G, other: &Buffer) -> Ordering
    where
        G: EncodingGateway + ?Sized,
    {
        gw.compare_ranges(&self.to_vec(), &other.to_vec())
    }

    /// Node's static `Buffer.compare(a, b)`.
    pub fn compare_buffers<G>(gw: &G, a: &Buffer, b: &Buffer) -> Ordering
    where
        G: EncodingGateway + ?Sized,
    {
        a.compare(gw, b)
    }

    /// Compares `self[source_range]` with `target[target_range]` (Node's
    /// `buf.compare(target, targetStart, targetEnd, sourceStart, sourceEnd)`).
    ///
    /// An empty target range orders before any non-empty source range.
    ///
    /// # Errors
    ///
    /// Fails with a range error if a range extends past its view.
    pub fn compare_range<G>(
        &self,
        gw: &G,
        target: &Buffer,
        target_range: impl RangeBounds<usize>,
        source_range: impl RangeBounds<usize>,
    ) -> Result<Ordering>
    where
        G: EncodingGateway + ?Sized,
    {
        let (target_start, target_end) = bounds(target_range, target.len);
        let (source_start, source_end) = bounds(source_range, self.len);

        if target_start > target.len {
            return Err(Error::out_of_range("targetStart", "<= target.length", target_start));
        }
        if target_end > target.len {
            return Err(Error::out_of_range("targetEnd", "<= target.length", target_end));
        }
        if source_start > self.len {
            return Err(Error::out_of_range("sourceStart", "<= source.length", source_start));
        }
        if source_end > self.len {
            return Err(Error::out_of_range("sourceEnd", "<= source.length", source_end));
        }

        if target_start >= target_end {
            return Ok(if source_start >= source_end {
                Ordering::Equal
            } else {
                Ordering::Greater
            });
        }
        if source_start >= source_end {
            return Ok(Ordering::Less);
        }

        let a = self
            .storage
            .copy_out(self.offset + source_start, source_end - source_start);
        let b = target
            .storage
            .copy_out(target.offset + target_start, target_end - target_start);
        Ok(gw.compare_ranges(&a, &b))
    }

    /// `true` if both views hold the same bytes.
    pub fn equals<G>(&self, gw: &G, other: &Buffer) -> bool
    where
        G: EncodingGateway + ?Sized,
    {
        self.len == other.len && self.compare(gw, other) == Ordering::Equal
    }

    // ===== fill / copy / swap =====

    /// Fills `range` with `value` (Node's `buf.fill`) and returns `self` for
    /// chaining.
    ///
    /// A number sets every byte to `value & 0xff`. A string (encoded with
    /// `encoding`, default utf8), byte sequence or buffer is repeated and
    /// truncated to exactly cover the range; an empty pattern changes
    /// nothing. An empty or inverted range is a no-op.
    ///
    /// # Errors
    ///
    /// Fails with a range error if either end of `range` is past the end of
    /// the view. Nothing is written in that case.
    ///
    /// ```
    /// use rcbuffer::{Buffer, Codec};
    ///
    /// let buf = Buffer::alloc(6).unwrap();
    /// buf.fill(&Codec, "xy", 1..5, None).unwrap().fill(&Codec, 0x21, 5.., None).unwrap();
    /// assert_eq!(buf, &b"\0xyxy!"[..]);
    /// ```
    pub fn fill<'a, G, V>(
        &self,
        gw: &G,
        value: V,
        range: impl RangeBounds<usize>,
        encoding: Option<Encoding>,
    ) -> Result<&Buffer>
    where
        G: EncodingGateway + ?Sized,
        V: Into<FillValue<'a>>,
    {
        let (start, end) = bounds(range, self.len);
        if start > self.len {
            return Err(Error::out_of_range("offset", "<= buf.length", start));
        }
        if end > self.len {
            return Err(Error::out_of_range("end", "<= buf.length", end));
        }
        if end <= start {
            return Ok(self);
        }

        let pattern = value.into().resolve(gw, encoding)?;
        let mut scratch = vec![0u8; end - start];
        match &pattern {
            Pattern::Byte(b) => gw.fill_byte(&mut scratch, *b),
            Pattern::Seq(p) if p.is_empty() => return Ok(self),
            Pattern::Seq(p) => gw.fill_pattern(&mut scratch, p),
        }
        self.storage.write(self.offset + start, &scratch);
        Ok(self)
    }

    /// Copies `self[source_start..source_end]` into `target` at
    /// `target_start` and returns the number of bytes copied.
    ///
    /// The count is truncated to what fits in `target`. A `target_start` at
    /// or past the end of `target`, or an empty source range, copies
    /// nothing. `self` and `target` may alias the same storage; the copy
    /// behaves as if it went through an intermediate buffer.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(b"abcdef").unwrap();
    /// let tail = buf.subarray(Some(2), None);
    /// assert_eq!(buf.copy(&tail, 0, 0, None), 4);
    /// assert_eq!(buf, &b"ababcd"[..]);
    /// ```
    pub fn copy(
        &self,
        target: &Buffer,
        target_start: usize,
        source_start: usize,
        source_end: Option<usize>,
    ) -> usize {
        let source_end = cmp::min(source_end.unwrap_or(self.len), self.len);
        if target_start >= target.len || source_start >= source_end {
            return 0;
        }

        let n = cmp::min(source_end - source_start, target.len - target_start);
        ByteStorage::copy_between(
            &self.storage,
            self.offset + source_start,
            &target.storage,
            target.offset + target_start,
            n,
        );
        n
    }

    /// Reverses the byte order of every 16-bit group in place.
    ///
    /// # Errors
    ///
    /// Fails with a range error if the length is not a multiple of 2.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let buf = Buffer::from_bytes(&[1, 2, 3, 4]).unwrap();
    /// buf.swap16().unwrap();
    /// assert_eq!(buf, &[2, 1, 4, 3][..]);
    /// ```
    pub fn swap16(&self) -> Result<&Buffer> {
        self.swap(2)
    }

    /// Reverses the byte order of every 32-bit group in place.
    pub fn swap32(&self) -> Result<&Buffer> {
        self.swap(4)
    }

    /// Reverses the byte order of every 64-bit group in place.
    pub fn swap64(&self) -> Result<&Buffer> {
        self.swap(8)
    }

    fn swap(&self, width: usize) -> Result<&Buffer> {
        if self.len % width != 0 {
            return Err(Error::InvalidSwapSize { bits: width * 8 });
        }
        let mut bytes = self.to_vec();
        for group in bytes.chunks_exact_mut(width) {
            group.reverse();
        }
        self.storage.write(self.offset, &bytes);
        Ok(self)
    }

    // ===== raw access for the numeric accessors =====

    #[inline]
    pub(crate) fn check_access(&self, offset: usize, width: usize) -> Result<()> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(Error::OutOfBounds {
                offset,
                width,
                len: self.len,
            }),
        }
    }

    #[inline]
    pub(crate) fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.check_access(offset, N)?;
        let mut out = [0u8; N];
        self.storage.read(self.offset + offset, &mut out);
        Ok(out)
    }

    #[inline]
    pub(crate) fn write_array<const N: usize>(&self, offset: usize, bytes: [u8; N]) -> Result<usize> {
        self.check_access(offset, N)?;
        self.storage.write(self.offset + offset, &bytes);
        Ok(offset + N)
    }

    #[inline]
    pub(crate) fn read_into(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        self.check_access(offset, dst.len())?;
        self.storage.read(self.offset + offset, dst);
        Ok(())
    }

    #[inline]
    pub(crate) fn write_from(&self, offset: usize, src: &[u8]) -> Result<usize> {
        self.check_access(offset, src.len())?;
        self.storage.write(self.offset + offset, src);
        Ok(offset + src.len())
    }
}

/// Resolves a possibly negative index the way typed-array methods do.
fn relative_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        cmp::min(index as usize, len)
    }
}

fn bounds(range: impl RangeBounds<usize>, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&n) => n.saturating_add(1),
        Bound::Excluded(&n) => n,
        Bound::Unbounded => len,
    };
    (start, end)
}

impl Default for Buffer {
    #[inline]
    fn default() -> Buffer {
        Buffer::new()
    }
}

impl IntoIterator for Buffer {
    type Item = u8;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl hash::Hash for Buffer {
    fn hash<H>(&self, state: &mut H)
    where
        H: hash::Hasher,
    {
        hash::Hash::hash(&self.to_vec(), state);
    }
}

// impl Eq

impl PartialEq for Buffer {
    fn eq(&self, other: &Buffer) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Buffer {}

impl PartialOrd for Buffer {
    fn partial_cmp(&self, other: &Buffer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Buffer {
    fn cmp(&self, other: &Buffer) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter().copied())
    }
}

impl PartialEq<Buffer> for [u8] {
    fn eq(&self, other: &Buffer) -> bool {
        *other == *self
    }
}

impl PartialEq<str> for Buffer {
    fn eq(&self, other: &str) -> bool {
        *self == *other.as_bytes()
    }
}

impl PartialEq<Buffer> for str {
    fn eq(&self, other: &Buffer) -> bool {
        *other == *self
    }
}

impl PartialEq<Vec<u8>> for Buffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        *self == other[..]
    }
}

impl PartialEq<Buffer> for Vec<u8> {
    fn eq(&self, other: &Buffer) -> bool {
        *other == *self
    }
}

impl<'a, T: ?Sized> PartialEq<&'a T> for Buffer
where
    Buffer: PartialEq<T>,
{
    fn eq(&self, other: &&'a T) -> bool {
        *self == **other
    }
}

// impl From

impl TryFrom<Vec<u8>> for Buffer {
    type Error = Error;

    fn try_from(vec: Vec<u8>) -> Result<Buffer> {
        Buffer::from_vec(vec)
    }
}

impl TryFrom<&[u8]> for Buffer {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Buffer> {
        Buffer::from_bytes(bytes)
    }
}

impl From<&Buffer> for Vec<u8> {
    fn from(buf: &Buffer) -> Vec<u8> {
        buf.to_vec()
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buf: Buffer) -> Vec<u8> {
        buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{relative_index, Buffer};
    use crate::ByteStorage;

    #[test]
    fn relative_indices() {
        assert_eq!(relative_index(-1, 5), 4);
        assert_eq!(relative_index(-9, 5), 0);
        assert_eq!(relative_index(9, 5), 5);
        assert_eq!(relative_index(2, 5), 2);
    }

    #[test]
    fn views_share_storage() {
        let buf = Buffer::alloc(8).unwrap();
        let sub = buf.subarray(Some(2), Some(6));
        assert!(ByteStorage::ptr_eq(buf.storage(), sub.storage()));
        assert_eq!(sub.byte_offset(), 2);
        assert_eq!(buf.storage().ref_count(), 2);
        drop(sub);
        assert_eq!(buf.storage().ref_count(), 1);
    }

    #[test]
    fn nested_views_offset_accumulates() {
        let buf = Buffer::from_bytes(b"0123456789").unwrap();
        let a = buf.subarray(Some(2), None);
        let b = a.subarray(Some(3), Some(5));
        assert_eq!(b.byte_offset(), 5);
        assert_eq!(b, &b"56"[..]);
    }

    #[test]
    fn access_is_bounded_by_view_not_storage() {
        let buf = Buffer::alloc(8).unwrap();
        let sub = buf.subarray(Some(0), Some(2));
        assert!(sub.set(2, 1).is_err());
        assert_eq!(sub.get(2), None);
        assert_eq!(buf.get(2), Some(0));
    }
}
