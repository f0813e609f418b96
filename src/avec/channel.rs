//! Channel-based bounded chunk decoder.

use std::{io::Read, vec::Vec};

use encoding_rs::Encoding;

use crate::sans::{
    budget::Budget,
    marker::{self, Matcher, Search},
    transcode::{Step, Text, Transcoder},
};

use super::{CharRead, Error, source::Source};

extern crate std;

/// Default capacity of the internal byte buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Decodes one chunk of a document from a byte channel.
///
/// Characters decoded from the first `budget` bytes are delivered as they are.
/// From there on, each character is compared against the end marker, and the
/// stream ends immediately after the first complete occurrence, or at the end
/// of the channel if there is none.
///
/// Bytes are decoded no further than the budget while characters pass
/// unexamined, then one at a time, so that [`consumed`](Self::consumed) is
/// the exact byte offset just past the marker once the end is reached. Another
/// chunk started at that offset continues the document seamlessly.
///
/// Capping the byte window makes per-request planning unnecessary here. For
/// planning by worst-case character width instead, see
/// [`Budget::plan`](crate::sans::Budget::plan) as used by
/// [`StreamDecoder`](super::StreamDecoder).
pub struct ChunkDecoder<R> {
    source: Source<R>,
    transcoder: Transcoder,
    text: Text,
    scanning: bool, // Characters in `text` are past the budget.
    budget: Budget,
    consumed: u64,
    marker: Vec<char>,
    matcher: Matcher,
    reached_end: bool,
}

impl<R: Read> ChunkDecoder<R> {
    /// Create a decoder with the default buffer capacity.
    pub fn new(
        channel: R,
        encoding: &'static Encoding,
        budget: u64,
        marker: &str,
    ) -> Result<Self, Error> {
        Self::with_capacity(channel, encoding, budget, marker, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a decoder reading the channel through a buffer of `capacity`
    /// bytes.
    pub fn with_capacity(
        channel: R,
        encoding: &'static Encoding,
        budget: u64,
        marker: &str,
        capacity: usize,
    ) -> Result<Self, Error> {
        let marker: Vec<char> = marker.chars().collect();
        marker::validate(&marker)?;

        Ok(Self {
            source: Source::new(channel, capacity),
            transcoder: Transcoder::new(encoding),
            text: Text::new(),
            scanning: false,
            budget: Budget::new(budget),
            consumed: 0,
            marker,
            matcher: Matcher::new(Search::Exact),
            reached_end: false,
        })
    }

    /// Number of bytes consumed from the channel by the text decoder.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn budget(&self) -> u64 {
        self.budget.bytes()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.transcoder.encoding()
    }

    /// Whether the end marker has been matched.
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// Give up the channel, or `None` if the decoder was closed.
    pub fn into_inner(mut self) -> Option<R> {
        self.source.close()
    }

    /// Fill `dst` until it is full, the marker is matched, or the decoder is
    /// flushed.
    fn fill(&mut self, dst: &mut [char]) -> Result<usize, Error> {
        let mut n = 0;

        while n < dst.len() {
            if self.text.is_empty() {
                if self.transcoder.is_flushed() {
                    break;
                }

                self.step()?;
                continue;
            }

            if !self.scanning {
                n += self.text.take_into(&mut dst[n..]);
                continue;
            }

            while n < dst.len() {
                let Some(c) = self.text.pop() else { break };
                dst[n] = c;
                n += 1;

                if self.matcher.advance(&self.marker, c) {
                    self.finish();
                    return Ok(n);
                }
            }
        }

        Ok(n)
    }

    /// Decode the next run of bytes into the empty text window.
    fn step(&mut self) -> Result<(), Error> {
        self.source.fill()?;

        let remaining = self.budget.remaining(self.consumed);
        self.scanning = remaining == 0;

        let available = self.source.available();
        let take = if self.scanning {
            available.len().min(1)
        } else {
            available
                .len()
                .min(usize::try_from(remaining).unwrap_or(usize::MAX))
        };

        let last = self.source.is_exhausted() && take == available.len();

        let step = self
            .transcoder
            .decode(&available[..take], &mut self.text, last)?;

        let read = step.read();
        self.source.consume(read);
        self.consumed += read as u64;

        if let Step::Malformed { .. } = step {
            log::trace!("replaced malformed input before byte {}", self.consumed);
        }

        Ok(())
    }

    fn finish(&mut self) {
        self.reached_end = true;
        self.text.clear();
        log::debug!(
            "end marker matched after {} bytes (budget {})",
            self.consumed,
            self.budget.bytes()
        );
    }
}

impl<R: Read> CharRead for ChunkDecoder<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.source.is_closed() {
            Err(Error::Closed)?;
        }

        if self.reached_end {
            return Ok(0);
        }

        self.fill(buf)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.text.clear();
        self.source.close();
        Ok(())
    }
}
