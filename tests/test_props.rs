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

use std::cmp::Ordering;

use proptest::prelude::*;
use rcbuffer::{Buffer, Codec, Encoding};

const GW: Codec = Codec::new();

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..max)
}

proptest! {
    #[test]
    fn fixed_width_write_then_read(v in any::<u32>(), w in any::<i16>(), d in any::<f64>(), pad in 0usize..8) {
        let buf = Buffer::alloc(pad + 8).unwrap();

        prop_assert_eq!(buf.write_u32_be(v, pad).unwrap(), pad + 4);
        prop_assert_eq!(buf.read_u32_be(pad).unwrap(), v);

        buf.write_i16_le(w, pad).unwrap();
        prop_assert_eq!(buf.read_i16_le(pad).unwrap(), w);

        buf.write_f64_be(d, pad).unwrap();
        prop_assert_eq!(buf.read_f64_be(pad).unwrap().to_bits(), d.to_bits());
    }

    #[test]
    fn variable_width_write_then_read(width in 1usize..=6, raw in any::<i64>(), le in any::<bool>()) {
        let bits = 8 * width as u32;
        let signed = raw >> (64 - bits);
        let unsigned = (raw as u64) >> (64 - bits);
        let buf = Buffer::alloc(width).unwrap();

        if le {
            buf.write_int_le(signed, 0, width).unwrap();
            prop_assert_eq!(buf.read_int_le(0, width).unwrap(), signed);
            buf.write_uint_le(unsigned, 0, width).unwrap();
            prop_assert_eq!(buf.read_uint_le(0, width).unwrap(), unsigned);
        } else {
            buf.write_int_be(signed, 0, width).unwrap();
            prop_assert_eq!(buf.read_int_be(0, width).unwrap(), signed);
            buf.write_uint_be(unsigned, 0, width).unwrap();
            prop_assert_eq!(buf.read_uint_be(0, width).unwrap(), unsigned);
        }
    }

    #[test]
    fn signed_write_is_twos_complement(width in 1usize..=6, raw in any::<i64>()) {
        let bits = 8 * width as u32;
        let signed = raw >> (64 - bits);
        let buf = Buffer::alloc(width).unwrap();

        buf.write_int_be(signed, 0, width).unwrap();
        prop_assert_eq!(buf.to_vec(), signed.to_be_bytes()[8 - width..].to_vec());
    }

    #[test]
    fn views_alias(data in bytes(64), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>(), v in any::<u8>()) {
        prop_assume!(!data.is_empty());
        let buf = Buffer::from_bytes(&data).unwrap();
        let (start, end) = {
            let (x, y) = (a.index(data.len()), b.index(data.len()));
            (x.min(y), x.max(y) + 1)
        };
        let view = buf.subarray(Some(start as isize), Some(end as isize));
        prop_assert_eq!(view.len(), end - start);

        view.set(0, v).unwrap();
        prop_assert_eq!(buf.get(start), Some(v));

        buf.set(end - 1, v.wrapping_add(1)).unwrap();
        prop_assert_eq!(view.get(end - start - 1), Some(v.wrapping_add(1)));
    }

    #[test]
    fn copies_never_alias(data in bytes(64)) {
        prop_assume!(!data.is_empty());
        let src = Buffer::from_bytes(&data).unwrap();
        let a = Buffer::copy_bytes_from(&src, None, None).unwrap();
        let b = Buffer::from_source(&GW, &src).unwrap();

        src.set(0, data[0].wrapping_add(1)).unwrap();
        prop_assert_eq!(a.get(0), Some(data[0]));
        prop_assert_eq!(b.get(0), Some(data[0]));
    }

    #[test]
    fn concat_is_juxtaposition(x in bytes(32), y in bytes(32), n in 0usize..80) {
        let a = Buffer::from_bytes(&x).unwrap();
        let b = Buffer::from_bytes(&y).unwrap();

        let mut expected = x.clone();
        expected.extend_from_slice(&y);
        prop_assert_eq!(Buffer::concat(vec![&a, &b], None).unwrap().to_vec(), expected.clone());

        expected.resize(n, 0);
        let truncated = Buffer::concat(vec![&a, &b], Some(n)).unwrap();
        prop_assert_eq!(truncated.len(), n);
        prop_assert_eq!(truncated.to_vec(), expected);
    }

    #[test]
    fn index_of_finds_planted_needle(prefix in bytes(32), needle in bytes(8), suffix in bytes(32)) {
        prop_assume!(!needle.is_empty());
        let mut data = prefix.clone();
        data.extend_from_slice(&needle);
        data.extend_from_slice(&suffix);
        let buf = Buffer::from_bytes(&data).unwrap();

        let found = buf.index_of(&GW, &needle, None, None).unwrap();
        prop_assert!(found.is_some());
        let k = found.unwrap();
        prop_assert!(k <= prefix.len());
        prop_assert_eq!(&data[k..k + needle.len()], &needle[..]);

        let last = buf.last_index_of(&GW, &needle, None, None).unwrap().unwrap();
        prop_assert!(last >= prefix.len());
        prop_assert_eq!(&data[last..last + needle.len()], &needle[..]);
    }

    #[test]
    fn index_of_agrees_with_naive_search(data in bytes(48), needle in bytes(3), off in -60isize..60) {
        let buf = Buffer::from_bytes(&data).unwrap();
        let start = if off < 0 {
            data.len().saturating_sub(off.unsigned_abs())
        } else {
            (off as usize).min(data.len())
        };
        let naive = if needle.is_empty() {
            None
        } else {
            (start..data.len())
                .find(|&i| data[i..].starts_with(&needle))
        };
        prop_assert_eq!(buf.index_of(&GW, &needle, Some(off), None).unwrap(), naive);
    }

    #[test]
    fn last_index_of_agrees_with_naive_search(data in bytes(48), needle in bytes(3), off in -60isize..60) {
        let buf = Buffer::from_bytes(&data).unwrap();
        let from = if off < 0 {
            data.len().checked_sub(off.unsigned_abs())
        } else {
            Some((off as usize).min(data.len()))
        };
        let naive = match from {
            Some(from) if !needle.is_empty() => (0..=from)
                .rev()
                .find(|&i| data[i..].starts_with(&needle)),
            _ => None,
        };
        prop_assert_eq!(buf.last_index_of(&GW, &needle, Some(off), None).unwrap(), naive);
    }

    #[test]
    fn fill_repeats_pattern(len in 0usize..40, pattern in bytes(5)) {
        let buf = Buffer::alloc(len).unwrap();
        buf.fill(&GW, &pattern, .., None).unwrap();

        let expected: Vec<u8> = if pattern.is_empty() {
            vec![0; len]
        } else {
            pattern.iter().copied().cycle().take(len).collect()
        };
        prop_assert_eq!(buf.to_vec(), expected);
    }

    #[test]
    fn compare_is_a_total_order(a in bytes(6), b in bytes(6), c in bytes(6)) {
        let (a, b, c) = (
            Buffer::from_bytes(&a).unwrap(),
            Buffer::from_bytes(&b).unwrap(),
            Buffer::from_bytes(&c).unwrap(),
        );

        prop_assert_eq!(a.compare(&GW, &a), Ordering::Equal);
        prop_assert_eq!(a.compare(&GW, &b), b.compare(&GW, &a).reverse());
        if a.compare(&GW, &b) != Ordering::Greater && b.compare(&GW, &c) != Ordering::Greater {
            prop_assert_ne!(a.compare(&GW, &c), Ordering::Greater);
        }
        prop_assert_eq!(a.compare(&GW, &b), a.cmp(&b));
    }

    #[test]
    fn json_round_trip(data in bytes(64)) {
        let buf = Buffer::from_bytes(&data).unwrap();
        let back = Buffer::from_json(buf.to_json()).unwrap();
        prop_assert_eq!(back.to_vec(), data);
    }

    #[test]
    fn utf8_round_trip(s in any::<String>()) {
        let buf = Buffer::from_string(&GW, &s, Encoding::Utf8).unwrap();
        prop_assert_eq!(buf.len(), s.len());
        prop_assert_eq!(buf.decode(&GW, Encoding::Utf8, ..).unwrap(), s);
    }

    #[test]
    fn binary_encodings_round_trip(data in bytes(64)) {
        let buf = Buffer::from_bytes(&data).unwrap();
        for &enc in &[Encoding::Hex, Encoding::Base64, Encoding::Latin1] {
            let s = buf.decode(&GW, enc, ..).unwrap();
            let back = Buffer::from_string(&GW, &s, enc).unwrap();
            prop_assert_eq!(back.to_vec(), data.clone());
        }
    }
}
