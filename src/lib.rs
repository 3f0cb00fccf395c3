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
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
#![no_std]

//! Provides a reference counted, shareable byte buffer with the semantics of
//! Node's `Buffer`.
//!
//! The crate provides one buffer type ([`Buffer`]), the storage behind it
//! ([`ByteStorage`]) and a trait for the text codec and byte search engine
//! it delegates to ([`EncodingGateway`]).
//!
//! # `Buffer`
//!
//! `Buffer` is a fixed-length, mutable window onto a region of bytes.
//! Several `Buffer` values may point at the same region: `subarray`, `slice`
//! and [`Buffer::from_storage`] never copy, so a write through one view is
//! visible through every other view over the same bytes. The region is
//! freed when the last view is dropped.
//!
//! ```rust
//! use rcbuffer::{Buffer, Codec, Encoding};
//!
//! let codec = Codec::new();
//! let buf = Buffer::alloc(8).unwrap();
//!
//! let head = buf.subarray(None, Some(4));
//! head.write_u32_be(0xdead_beef, 0).unwrap();
//! buf.write_str(&codec, "hi", 4, None, Encoding::Utf8).unwrap();
//!
//! assert_eq!(buf.decode(&codec, Encoding::Hex, ..).unwrap(), "deadbeef68690000");
//! assert_eq!(head.storage().ref_count(), 2);
//! ```
//!
//! Every read and write is bounds-checked against the view, and offsets are
//! never allowed to reach past it into the rest of the region.
//!
//! # `EncodingGateway`
//!
//! Strings never cross into `Buffer` directly. Encoding, decoding, byte
//! length computation, pattern search, pattern fill and comparison are all
//! requested from an [`EncodingGateway`] passed to the operation that needs
//! it. [`Codec`] is the implementation shipped with the crate and supports
//! `utf8`, `hex`, `base64`, `latin1`/`binary`, `ascii` and `utf16le`/`ucs2`.
//!
//! # Threads
//!
//! Reference counts are not atomic and views alias freely, so `Buffer` and
//! `ByteStorage` are neither `Send` nor `Sync`.
//!
//! # Features
//!
//! - `std` (default): links `std` and enables `std` in the dependencies.
//! - `serde`: (de)serializes `Buffer` as `{"type":"Buffer","data":[..]}`.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod buffer;
mod constants;
mod encoding;
mod error;
mod fmt;
pub mod gateway;
mod int;
pub mod iter;
mod json;
mod source;
mod storage;
pub mod util;

pub use crate::buffer::Buffer;
pub use crate::constants::{
    Constants, CONSTANTS, INSPECT_MAX_BYTES, K_MAX_LENGTH, K_STRING_MAX_LENGTH, POOL_SIZE,
};
pub use crate::encoding::Encoding;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::gateway::{Codec, EncodingGateway};
pub use crate::json::JsonDescriptor;
pub use crate::source::{BufferSource, FillValue, Needle};
pub use crate::storage::ByteStorage;

// Optional Serde support
#[cfg(feature = "serde")]
mod serde;

#[inline(never)]
#[cold]
fn abort() -> ! {
    #[cfg(feature = "std")]
    {
        std::process::abort();
    }

    #[cfg(not(feature = "std"))]
    {
        struct Abort;
        impl Drop for Abort {
            fn drop(&mut self) {
                panic!();
            }
        }
        let _a = Abort;
        panic!("abort");
    }
}
