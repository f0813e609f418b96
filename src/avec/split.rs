//! Planning and opening independently decodable chunks of a document.
//!
//! A document of `len` bytes is cut into splits of a fixed size. The decoder
//! for a split reads past its end until the first end marker, and every split
//! but the first skips its leading partial record through that same marker, so
//! no record is lost or repeated:
//!
//! ```
//! let config = Config { chunk_size: 1 << 20, ..Config::default() };
//!
//! for split in config.splits(file.metadata()?.len()) {
//!     let mut chunk = config.open(File::open(&path)?, split)?;
//!     // Hand `chunk` to a tokenizer, for example through a `Utf8Reader`.
//! }
//! ```

use std::{
    io::{BufReader, Read, Seek, SeekFrom},
    string::String,
    vec::Vec,
};

use either::Either::{self, Left, Right};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::sans::marker::{Matcher, Search};

use super::{CharRead, ChunkDecoder, Error, StreamDecoder, channel::DEFAULT_BUFFER_CAPACITY};

extern crate std;

/// Default number of bytes in a split.
pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024 * 1024;

/// Which decoder reads a split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    /// A [`ChunkDecoder`] reading the source directly.
    #[default]
    Channel,
    /// A [`StreamDecoder`] reading the source through a [`BufReader`].
    Stream,
}

/// A byte range of a document, decoded independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Position of the split in the document.
    pub index: usize,
    /// Offset of the first byte.
    pub offset: u64,
    /// Bytes after which the decoder stops at the next end marker.
    pub budget: u64,
}

/// The decoder opened for a split.
pub type Chunk<R> = Either<ChunkDecoder<R>, StreamDecoder<BufReader<R>>>;

/// Settings shared by every split of a document.
#[derive(Debug, Clone)]
pub struct Config {
    pub chunk_size: u64,
    /// Record delimiter ending each chunk.
    pub marker: String,
    pub encoding: &'static Encoding,
    /// Bytes read from the source at a time.
    pub buffer_capacity: usize,
    pub access: Access,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            marker: "\n".into(),
            encoding: UTF_8,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            access: Access::default(),
        }
    }
}

impl Config {
    /// Chunk size rounded up to whole code units of the encoding.
    pub fn aligned_chunk_size(&self) -> u64 {
        let unit = if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            2
        } else {
            1
        };

        self.chunk_size.max(1).next_multiple_of(unit)
    }

    /// Plan the splits of a document of `len` bytes.
    ///
    /// There is always at least one split, so an empty document still opens.
    pub fn splits(&self, len: u64) -> Vec<Split> {
        let size = self.aligned_chunk_size();
        let count = len.div_ceil(size).max(1);

        log::trace!("planning {count} splits of {size} bytes over {len} bytes");

        (0..count)
            .map(|i| Split {
                index: i as usize,
                offset: i * size,
                budget: size,
            })
            .collect()
    }

    /// Open the decoder for a split of `source`.
    ///
    /// The source is positioned at the split's offset. For every split but
    /// the first, the leading partial record, which belongs to the previous
    /// split, is skipped.
    pub fn open<R: Read + Seek>(&self, mut source: R, split: Split) -> Result<Chunk<R>, Error> {
        source.seek(SeekFrom::Start(split.offset))?;

        let (mut chunk, search) = match self.access {
            Access::Channel => {
                let decoder = ChunkDecoder::with_capacity(
                    source,
                    self.encoding,
                    split.budget,
                    &self.marker,
                    self.buffer_capacity,
                )?;
                (Left(decoder), Search::Exact)
            }
            Access::Stream => {
                // Decoding a byte at a time keeps the stream count exact.
                let stream = BufReader::with_capacity(self.buffer_capacity.max(1), source);
                let decoder = StreamDecoder::with_capacity(
                    stream,
                    self.encoding,
                    &self.marker,
                    split.budget,
                    1,
                )?;
                (Right(decoder), Search::Restart)
            }
        };

        if split.index != 0 {
            let skipped = skip_record(&mut chunk, &self.marker, search)?;
            log::debug!(
                "split {} skipped {skipped} characters of a partial record",
                split.index
            );
        }

        Ok(chunk)
    }
}

/// Read through the first occurrence of `marker`, returning the number of
/// characters discarded.
pub fn skip_record(reader: &mut impl CharRead, marker: &str, search: Search) -> Result<u64, Error> {
    let marker: Vec<char> = marker.chars().collect();
    crate::sans::marker::validate(&marker)?;

    let mut matcher = Matcher::new(search);
    let mut one = ['\0'];
    let mut skipped = 0;

    while reader.read_chars(&mut one)? != 0 {
        skipped += 1;

        if matcher.advance(&marker, one[0]) {
            break;
        }
    }

    Ok(skipped)
}
