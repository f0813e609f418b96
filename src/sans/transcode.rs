//! Steps decoding source bytes into characters.

use encoding_rs::{
    BIG5, Decoder, DecoderResult, EUC_JP, EUC_KR, Encoding, GB18030, GBK, ISO_2022_JP, SHIFT_JIS,
    UTF_8, UTF_16BE, UTF_16LE,
};
use thiserror::Error;

/// Capacity, in characters, of a [`Text`] window.
pub const TEXT_CAPACITY: usize = 256;

/// An error stepping a transcoder.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The decoder wrote bytes that are not UTF-8.
    #[error("Decoder produced invalid text after {0} bytes.")]
    InvalidOutput(usize),
}

/// Outcome of a single decoding step, with the number of source bytes read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Every supplied byte was consumed.
    Underflow { read: usize },
    /// The text window filled before every supplied byte was consumed.
    Overflow { read: usize },
    /// A malformed sequence ending at `read` was replaced with U+FFFD.
    Malformed { read: usize },
}

impl Step {
    /// Number of source bytes consumed by this step.
    pub fn read(self) -> usize {
        match self {
            Step::Underflow { read } | Step::Overflow { read } | Step::Malformed { read } => read,
        }
    }
}

/// A bounded window of decoded characters awaiting delivery.
#[derive(Debug)]
pub struct Text {
    chars: [char; TEXT_CAPACITY],
    start: usize,
    end: usize,
}

impl Text {
    pub const fn new() -> Self {
        Self {
            chars: ['\0'; TEXT_CAPACITY],
            start: 0,
            end: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of characters awaiting delivery.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Take the next character.
    pub fn pop(&mut self) -> Option<char> {
        if self.is_empty() {
            return None;
        }

        let c = self.chars[self.start];
        self.start += 1;
        Some(c)
    }

    /// Move as many characters as fit into `dst`, returning the count.
    pub fn take_into(&mut self, dst: &mut [char]) -> usize {
        let n = self.len().min(dst.len());
        dst[..n].copy_from_slice(&self.chars[self.start..self.start + n]);
        self.start += n;
        n
    }

    /// Discard all characters awaiting delivery.
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    fn push(&mut self, c: char) {
        debug_assert!(self.end < TEXT_CAPACITY);
        self.chars[self.end] = c;
        self.end += 1;
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateful decoder of one encoding, owned by a single bounded decoder.
pub struct Transcoder {
    decoder: Decoder,
    encoding: &'static Encoding,
    flushed: bool,
}

impl Transcoder {
    /// Create a transcoder, removing a byte order mark for `encoding` if the
    /// input begins with one.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder_with_bom_removal(),
            encoding,
            flushed: false,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Worst-case number of bytes encoding a single character.
    pub fn max_bytes_per_char(&self) -> usize {
        max_bytes_per_char(self.encoding)
    }

    /// Whether the decoder has been flushed after its last input.
    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Decode bytes from `src` into an empty `text` window.
    ///
    /// Pass `last` only when `src` holds every remaining byte of the input.
    /// The first such step to return [`Step::Underflow`] flushes the decoder;
    /// after that, steps read nothing and produce nothing.
    pub fn decode(
        &mut self,
        src: &[u8],
        text: &mut Text,
        last: bool,
    ) -> Result<Step, TranscodeError> {
        debug_assert!(text.is_empty());
        text.clear();

        if self.flushed {
            return Ok(Step::Underflow { read: 0 });
        }

        // Leave room for one replacement character.
        let mut utf8 = [0; TEXT_CAPACITY - 1];

        let (result, read, written) =
            self.decoder
                .decode_to_utf8_without_replacement(src, &mut utf8, last);

        let decoded = core::str::from_utf8(&utf8[..written])
            .map_err(|e| TranscodeError::InvalidOutput(e.valid_up_to()))?;

        decoded.chars().for_each(|c| text.push(c));

        let step = match result {
            DecoderResult::InputEmpty => {
                if last {
                    self.flushed = true;
                    log::debug!("{} decoder flushed", self.encoding.name());
                }
                Step::Underflow { read }
            }
            DecoderResult::OutputFull => Step::Overflow { read },
            DecoderResult::Malformed(_, _) => {
                text.push(char::REPLACEMENT_CHARACTER);
                Step::Malformed { read }
            }
        };

        Ok(step)
    }
}

impl core::fmt::Debug for Transcoder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Transcoder")
            .field("encoding", &self.encoding.name())
            .field("flushed", &self.flushed)
            .finish()
    }
}

/// Worst-case number of bytes encoding a single character in `encoding`.
pub fn max_bytes_per_char(encoding: &'static Encoding) -> usize {
    if encoding.is_single_byte() {
        1
    } else if encoding == ISO_2022_JP {
        // Escape sequences on both sides of a two-byte character.
        8
    } else if encoding == UTF_8 || encoding == GB18030 || encoding == UTF_16LE || encoding == UTF_16BE
    {
        4
    } else if encoding == EUC_JP {
        3
    } else if encoding == SHIFT_JIS || encoding == BIG5 || encoding == EUC_KR || encoding == GBK {
        2
    } else {
        4
    }
}
