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
//! Limits shared with Node's `buffer` module.

/// Largest length a single [`Buffer`](crate::Buffer) may have (`2^31 - 1`).
pub const K_MAX_LENGTH: usize = 2_147_483_647;

/// Largest string a decode may produce.
pub const K_STRING_MAX_LENGTH: usize = 536_870_888;

/// Number of bytes rendered by `Debug` before the remainder is elided.
pub const INSPECT_MAX_BYTES: usize = 50;

/// Size of Node's pre-allocation pool. Kept for API parity; allocations here
/// are never pooled.
pub const POOL_SIZE: usize = 8192;

/// Node's `buffer.constants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    /// See [`K_MAX_LENGTH`].
    pub max_length: usize,
    /// See [`K_STRING_MAX_LENGTH`].
    pub max_string_length: usize,
}

/// The limits as a single value.
pub const CONSTANTS: Constants = Constants {
    max_length: K_MAX_LENGTH,
    max_string_length: K_STRING_MAX_LENGTH,
};
