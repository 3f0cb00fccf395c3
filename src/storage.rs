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
use core::cell::Cell;
use core::ptr::{self, NonNull};
use core::{fmt, mem};

use alloc::{boxed::Box, vec, vec::Vec};

use crate::{Error, Result, K_MAX_LENGTH};

/// A fixed-capacity, reference counted region of bytes.
///
/// `ByteStorage` is the memory behind one or more [`Buffer`] views. Cloning a
/// `ByteStorage` only increments a reference count; the region is freed when
/// the last handle (including every view over it) is dropped. A region is
/// never resized after it has been allocated, and it is always initialized:
/// freshly allocated regions are zero-filled.
///
/// The reference count is not atomic, so `ByteStorage` (and therefore every
/// `Buffer`) is neither `Send` nor `Sync`. Views that alias a region can only
/// ever be observed from the thread that created it.
///
/// ```text
///
///    Rc ptrs                   ┌─────────┐
///    ________________________/ │ View 2  │
///   /                          └─────────┘
///  /         ┌───────────┐     |         |
/// |________/ │  View 1   │     |         |
/// |          └───────────┘     |         |
/// |          |           | ___/ offset   | offset + len
/// |   offset |    + len  |/              |
/// v          v           v               v
/// ┌────┬─────┬───────────┬───────────────┬─────┐
/// │ Rc │     │           │               │     │
/// └────┴─────┴───────────┴───────────────┴─────┘
/// ```
///
/// [`Buffer`]: crate::Buffer
pub struct ByteStorage {
    shared: NonNull<Shared>,
}

struct Shared {
    // Holds the boxed slice parts; rebuilt into a `Box<[u8]>` on drop.
    buf: *mut u8,
    cap: usize,
    ref_cnt: Cell<usize>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        tracing::trace!(cap = self.cap, "releasing byte storage");
        unsafe {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
                self.buf, self.cap,
            )));
        }
    }
}

impl ByteStorage {
    /// Allocates a zero-filled region of `cap` bytes.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `cap` exceeds [`K_MAX_LENGTH`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rcbuffer::ByteStorage;
    ///
    /// let storage = ByteStorage::zeroed(16).unwrap();
    /// assert_eq!(storage.capacity(), 16);
    /// ```
    pub fn zeroed(cap: usize) -> Result<ByteStorage> {
        check_size(cap)?;
        Ok(ByteStorage::from_boxed(vec![0u8; cap].into_boxed_slice()))
    }

    /// Takes ownership of `vec` as a new region without copying it.
    ///
    /// # Errors
    ///
    /// Fails with a range error if the vector is longer than [`K_MAX_LENGTH`].
    pub fn from_vec(vec: Vec<u8>) -> Result<ByteStorage> {
        check_size(vec.len())?;
        Ok(ByteStorage::from_boxed(vec.into_boxed_slice()))
    }

    pub(crate) fn empty() -> ByteStorage {
        ByteStorage::from_boxed(Vec::new().into_boxed_slice())
    }

    fn from_boxed(slice: Box<[u8]>) -> ByteStorage {
        let cap = slice.len();
        let buf = Box::into_raw(slice) as *mut u8;
        tracing::trace!(cap, "allocated byte storage");

        let shared = Box::new(Shared {
            buf,
            cap,
            ref_cnt: Cell::new(1),
        });
        ByteStorage {
            // `Box::into_raw` never returns null.
            shared: unsafe { NonNull::new_unchecked(Box::into_raw(shared)) },
        }
    }

    /// Returns the number of bytes in the region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared().cap
    }

    /// Returns the number of live handles sharing this region.
    #[inline]
    pub fn ref_count(&self) -> usize {
        self.shared().ref_cnt.get()
    }

    /// Returns `true` if both handles refer to the same region.
    #[inline]
    pub fn ptr_eq(a: &ByteStorage, b: &ByteStorage) -> bool {
        a.shared == b.shared
    }

    /// Copies the whole region into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.copy_out(0, self.capacity())
    }

    #[inline]
    fn shared(&self) -> &Shared {
        unsafe { self.shared.as_ref() }
    }

    #[inline]
    fn check(&self, offset: usize, len: usize) {
        let cap = self.capacity();
        assert!(
            offset <= cap && len <= cap - offset,
            "internal: storage range out of bounds: {:?} + {:?} > {:?}",
            offset,
            len,
            cap,
        );
    }

    // Every access below goes through the raw pointer and never materializes
    // a reference into the region, so aliasing views stay sound.

    #[inline]
    pub(crate) fn get(&self, index: usize) -> u8 {
        self.check(index, 1);
        unsafe { ptr::read(self.shared().buf.add(index)) }
    }

    #[inline]
    pub(crate) fn set(&self, index: usize, value: u8) {
        self.check(index, 1);
        unsafe { ptr::write(self.shared().buf.add(index), value) }
    }

    pub(crate) fn read(&self, offset: usize, dst: &mut [u8]) {
        self.check(offset, dst.len());
        // `dst` is a Rust reference, so it cannot point into this region.
        unsafe {
            ptr::copy_nonoverlapping(self.shared().buf.add(offset), dst.as_mut_ptr(), dst.len());
        }
    }

    pub(crate) fn write(&self, offset: usize, src: &[u8]) {
        self.check(offset, src.len());
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.shared().buf.add(offset), src.len());
        }
    }

    pub(crate) fn copy_out(&self, offset: usize, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.read(offset, &mut out);
        out
    }

    /// `memmove` between two regions that may be the same allocation.
    pub(crate) fn copy_between(
        src: &ByteStorage,
        src_offset: usize,
        dst: &ByteStorage,
        dst_offset: usize,
        len: usize,
    ) {
        src.check(src_offset, len);
        dst.check(dst_offset, len);
        unsafe {
            ptr::copy(
                src.shared().buf.add(src_offset),
                dst.shared().buf.add(dst_offset),
                len,
            );
        }
    }
}

fn check_size(size: usize) -> Result<()> {
    if size > K_MAX_LENGTH {
        tracing::debug!(size, "rejecting oversized allocation");
        return Err(Error::TooLarge {
            size,
            max: K_MAX_LENGTH,
        });
    }
    Ok(())
}

impl Clone for ByteStorage {
    #[inline]
    fn clone(&self) -> ByteStorage {
        let shared = self.shared();
        let old_size = shared.ref_cnt.get();
        if old_size > usize::MAX >> 1 {
            crate::abort();
        }
        shared.ref_cnt.set(old_size + 1);
        ByteStorage {
            shared: self.shared,
        }
    }
}

impl Drop for ByteStorage {
    #[inline]
    fn drop(&mut self) {
        let refs = self.shared().ref_cnt.get();
        self.shared().ref_cnt.set(refs - 1);

        if refs != 1 {
            return;
        }

        unsafe { drop(Box::from_raw(self.shared.as_ptr())) }
    }
}

impl fmt::Debug for ByteStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStorage")
            .field("capacity", &self.capacity())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

// Assert that `Shared` stays a small header next to the region.
const _: [(); 0 - (mem::size_of::<Shared>() > 4 * mem::size_of::<usize>()) as usize] = [];
