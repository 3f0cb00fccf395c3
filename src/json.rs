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
use alloc::{format, string::String, vec::Vec};

use crate::{Buffer, Error, Result};

/// The plain-data form of a buffer, `{"type":"Buffer","data":[..]}`.
///
/// Produced by [`Buffer::to_json`] and accepted by [`Buffer::from_json`].
/// With the `serde` feature enabled it (de)serializes to exactly that shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsonDescriptor {
    /// Always `"Buffer"` for descriptors produced by this crate.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// The bytes.
    pub data: Vec<u8>,
}

impl JsonDescriptor {
    /// The `type` tag of a buffer descriptor.
    pub const KIND: &'static str = "Buffer";

    /// Creates a descriptor holding `data`.
    pub fn new(data: Vec<u8>) -> JsonDescriptor {
        JsonDescriptor {
            kind: String::from(Self::KIND),
            data,
        }
    }
}

impl Buffer {
    /// Returns the plain-data form of this view.
    ///
    /// ```
    /// use rcbuffer::Buffer;
    ///
    /// let json = Buffer::from_bytes(&[1, 2, 3]).unwrap().to_json();
    /// assert_eq!(json.kind, "Buffer");
    /// assert_eq!(json.data, [1, 2, 3]);
    /// ```
    pub fn to_json(&self) -> JsonDescriptor {
        JsonDescriptor::new(self.to_vec())
    }

    /// Creates a buffer holding a copy of `desc.data`.
    ///
    /// # Errors
    ///
    /// Fails with a type error if `desc.kind` is not `"Buffer"`.
    pub fn from_json(desc: JsonDescriptor) -> Result<Buffer> {
        if desc.kind != JsonDescriptor::KIND {
            return Err(Error::InvalidArgType(format!(
                "expected a descriptor of type \"Buffer\", received \"{}\"",
                desc.kind
            )));
        }
        Buffer::from_vec(desc.data)
    }
}
