//! Bounded decoders and character stream wrappers.
//!
//! _Requires Cargo feature `std`._
//!
//! Every type in this module publishes characters through the [`CharRead`]
//! trait. A chunk of a document is usually read through a stack of them:
//!
//! - [`ChunkDecoder`] (or [`StreamDecoder`] where only a plain stream is
//! available) decodes a byte range, stopping just after the first end marker
//! found once its byte budget is exceeded.
//!
//! - [`Normalized`] rewrites platform line endings to `'\n'`.
//!
//! - [`Utf8Reader`] turns the characters back into UTF-8 bytes for a
//! byte-oriented tokenizer.
//!
//! [`split::Config`] plans the byte ranges of a file and opens the decoder for
//! each, so that the chunks, decoded independently and concatenated, give the
//! text of the whole document.

pub mod channel;
pub mod decode;
pub mod fill;
pub mod newline;
pub mod reader;
pub mod slice;
pub mod split;
pub mod utf8;

mod source;

use std::{boxed::Box, string::String};

use either::Either;
use encoding_rs::Encoding;
use thiserror::Error;

use crate::sans::{marker::MarkerError, transcode::TranscodeError};

pub use channel::ChunkDecoder;
pub use decode::DecodeReader;
pub use fill::FullFill;
pub use newline::Normalized;
pub use reader::StreamDecoder;
pub use utf8::Utf8Reader;

extern crate std;

/// Errors occurring while decoding characters.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying byte source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The decoder was read after being closed.
    #[error("Read from a closed decoder.")]
    Closed,
    /// Unusable end marker.
    #[error("Unusable end marker: {0}.")]
    Marker(#[from] MarkerError),
    /// The text decoder failed.
    #[error("Failed to decode text: {0}.")]
    Transcode(#[from] TranscodeError),
    /// No encoding is known by the label.
    #[error("Unknown encoding label ({0}).")]
    UnknownEncoding(String),
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::Closed => std::io::Error::new(std::io::ErrorKind::BrokenPipe, err),
            err => std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        }
    }
}

/// Look up an encoding by its WHATWG label, such as `"utf-8"` or
/// `"windows-1252"`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, Error> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.into()))
}

/// A source of decoded characters.
pub trait CharRead {
    /// Read characters into `buf`, returning how many were read.
    ///
    /// A non-empty buffer receives at least one character unless the stream
    /// has ended, in which case `Ok(0)` is returned. An empty buffer returns
    /// `Ok(0)` without side effects.
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error>;

    /// Release the underlying source.
    ///
    /// Closing twice is allowed. Reads after closing fail with
    /// [`Error::Closed`].
    fn close(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Read every remaining character, appending to `out`.
    ///
    /// Returns the number of characters appended.
    fn read_to_string(&mut self, out: &mut String) -> Result<usize, Error> {
        let mut buf = ['\0'; 1024];
        let mut total = 0;

        loop {
            let n = self.read_chars(&mut buf)?;
            if n == 0 {
                return Ok(total);
            }

            out.extend(&buf[..n]);
            total += n;
        }
    }
}

impl<C: CharRead + ?Sized> CharRead for &mut C {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        (**self).read_chars(buf)
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

impl<C: CharRead + ?Sized> CharRead for Box<C> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        (**self).read_chars(buf)
    }

    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

impl<L: CharRead, R: CharRead> CharRead for Either<L, R> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        either::for_both!(self, r => r.read_chars(buf))
    }

    fn close(&mut self) -> Result<(), Error> {
        either::for_both!(self, r => r.close())
    }
}
