//! Reader-based bounded decoder.
//!
//! A simpler variant of [`ChunkDecoder`](super::ChunkDecoder) for sources
//! offering nothing but [`Read`]. It counts the bytes pulled from the stream
//! rather than those consumed by the text decoder, and falls back to decoding
//! a single character at a time once near the threshold.

use std::{io::Read, vec::Vec};

use encoding_rs::Encoding;

use crate::sans::{
    budget::{Budget, Plan},
    marker::{self, Matcher, Search},
};

use super::{CharRead, DecodeReader, Error};

extern crate std;

/// A reader keeping count of the bytes read through it.
#[derive(Debug)]
pub struct Counting<R> {
    inner: R,
    count: u64,
}

impl<R> Counting<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    /// Number of bytes read so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Decodes one chunk of a document from a byte stream.
///
/// Once more than `threshold` bytes have been read from the stream, each
/// character is compared against the end marker, and the stream ends
/// immediately after the first occurrence (the marker is delivered). A
/// mismatch restarts the comparison from the beginning of the marker without
/// reconsidering the mismatching character; see [`Search::Restart`].
///
/// The stream is read one byte at a time so that the count is exact; wrap it
/// in a [`BufReader`](std::io::BufReader) to batch the underlying reads. With
/// a larger capacity (see [`with_capacity`](Self::with_capacity)), bytes
/// buffered ahead of the text decoder count as read, and matching may begin
/// before the threshold.
pub struct StreamDecoder<R> {
    inner: DecodeReader<Counting<R>>,
    max_bytes_per_char: usize,
    threshold: Budget,
    marker: Vec<char>,
    matcher: Matcher,
    reached_end: bool,
}

impl<R: Read> StreamDecoder<R> {
    pub fn new(
        stream: R,
        encoding: &'static Encoding,
        marker: &str,
        threshold: u64,
    ) -> Result<Self, Error> {
        Self::with_capacity(stream, encoding, marker, threshold, 1)
    }

    /// Create a decoder reading at most `capacity` bytes from the stream at a
    /// time.
    pub fn with_capacity(
        stream: R,
        encoding: &'static Encoding,
        marker: &str,
        threshold: u64,
        capacity: usize,
    ) -> Result<Self, Error> {
        let marker: Vec<char> = marker.chars().collect();
        marker::validate(&marker)?;

        let inner = DecodeReader::with_capacity(Counting::new(stream), encoding, capacity);

        Ok(Self {
            max_bytes_per_char: inner.max_bytes_per_char(),
            inner,
            threshold: Budget::new(threshold),
            marker,
            matcher: Matcher::new(Search::Restart),
            reached_end: false,
        })
    }

    /// Number of bytes read from the stream.
    pub fn count(&self) -> u64 {
        self.inner.get_ref().map_or(0, Counting::count)
    }

    pub fn threshold(&self) -> u64 {
        self.threshold.bytes()
    }

    /// Whether the end marker has been matched.
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// Give up the stream, or `None` if the decoder was closed.
    pub fn into_inner(self) -> Option<R> {
        self.inner.into_inner().map(Counting::into_inner)
    }

    /// Decode characters one at a time, matching past the threshold.
    fn scan(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        let mut one = ['\0'];
        let mut n = 0;

        while n < buf.len() {
            if self.inner.read_chars(&mut one)? == 0 {
                break;
            }

            let c = one[0];
            buf[n] = c;
            n += 1;

            if self.threshold.is_exceeded(self.count()) && self.matcher.advance(&self.marker, c) {
                self.reached_end = true;
                log::debug!(
                    "end marker matched after {} bytes (threshold {})",
                    self.count(),
                    self.threshold.bytes()
                );
                break;
            }
        }

        Ok(n)
    }
}

impl<R: Read> CharRead for StreamDecoder<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.inner.is_closed() {
            Err(Error::Closed)?;
        }

        let mut n = 0;

        while n < buf.len() && !self.reached_end {
            let rest = &mut buf[n..];

            let read = match self
                .threshold
                .plan(self.count(), rest.len(), self.max_bytes_per_char)
            {
                Plan::Direct => return Ok(n + self.inner.read_chars(rest)?),
                Plan::Prefix(k) => self.inner.read_chars(&mut rest[..k])?,
                Plan::Scan => return Ok(n + self.scan(rest)?),
            };

            if read == 0 {
                break;
            }

            n += read;
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.close()
    }
}
