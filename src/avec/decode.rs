//! Unbounded stream-to-character decoder.

use std::io::Read;

use encoding_rs::Encoding;

use crate::sans::transcode::{Text, Transcoder};

use super::{CharRead, Error, channel::DEFAULT_BUFFER_CAPACITY, source::Source};

extern crate std;

/// Decodes a whole byte stream into characters.
///
/// Reads return as soon as any characters are ready, so they may be short.
/// Bytes are read from the stream ahead of the characters delivered, up to the
/// buffer capacity.
pub struct DecodeReader<R> {
    source: Source<R>,
    transcoder: Transcoder,
    text: Text,
}

impl<R: Read> DecodeReader<R> {
    pub fn new(stream: R, encoding: &'static Encoding) -> Self {
        Self::with_capacity(stream, encoding, DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a decoder reading at most `capacity` bytes from the stream at a
    /// time.
    pub fn with_capacity(stream: R, encoding: &'static Encoding, capacity: usize) -> Self {
        Self {
            source: Source::new(stream, capacity),
            transcoder: Transcoder::new(encoding),
            text: Text::new(),
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.transcoder.encoding()
    }

    /// Worst-case number of stream bytes behind a single character.
    pub fn max_bytes_per_char(&self) -> usize {
        self.transcoder.max_bytes_per_char()
    }

    /// The stream, or `None` if the decoder was closed.
    pub fn get_ref(&self) -> Option<&R> {
        self.source.get_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_closed()
    }

    /// Give up the stream, or `None` if the decoder was closed.
    pub fn into_inner(mut self) -> Option<R> {
        self.source.close()
    }

    fn step(&mut self) -> Result<(), Error> {
        self.source.fill()?;

        let available = self.source.available();
        let last = self.source.is_exhausted();

        let step = self.transcoder.decode(available, &mut self.text, last)?;
        self.source.consume(step.read());

        Ok(())
    }
}

impl<R: Read> CharRead for DecodeReader<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.source.is_closed() {
            Err(Error::Closed)?;
        }

        while self.text.is_empty() {
            if self.transcoder.is_flushed() {
                return Ok(0);
            }

            self.step()?;
        }

        Ok(self.text.take_into(buf))
    }

    fn close(&mut self) -> Result<(), Error> {
        self.text.clear();
        self.source.close();
        Ok(())
    }
}
