//! Line-ending normalization of decoded characters.

/// Rewrites `"\r\n"`, `"\r"` and `"\n"` to a single `'\n'`, across any number
/// of buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEndings {
    // The last character seen was a carriage return, already rewritten.
    skip_line_feed: bool,
}

impl LineEndings {
    pub const fn new() -> Self {
        Self {
            skip_line_feed: false,
        }
    }

    /// Whether a line feed at the start of the next buffer will be dropped.
    pub fn is_pending(&self) -> bool {
        self.skip_line_feed
    }

    /// Normalize `buf` in place, returning the length of the compacted
    /// prefix.
    pub fn normalize(&mut self, buf: &mut [char]) -> usize {
        let mut w = 0;

        for r in 0..buf.len() {
            let c = buf[r];

            buf[w] = match c {
                '\n' if self.skip_line_feed => {
                    self.skip_line_feed = false;
                    continue;
                }
                '\r' => {
                    self.skip_line_feed = true;
                    '\n'
                }
                c => {
                    self.skip_line_feed = false;
                    c
                }
            };

            w += 1;
        }

        w
    }
}
