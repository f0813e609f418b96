//! End marker matching across reads.

use thiserror::Error;

/// An error validating an end marker.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The marker holds no characters.
    #[error("End marker is empty.")]
    Empty,
}

/// Check that `marker` can be matched.
pub fn validate(marker: &[char]) -> Result<(), MarkerError> {
    if marker.is_empty() {
        Err(MarkerError::Empty)?;
    }

    Ok(())
}

/// What a [`Matcher`] does when a character breaks a partial match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    /// Fall back to the longest marker prefix still ending at the character,
    /// so that every occurrence is found.
    Exact,
    /// Start over from the beginning of the marker. The breaking character is
    /// not compared again, so an occurrence overlapping a partial match (such
    /// as `"\r\n"` in `"\r\r\n"`) is missed.
    Restart,
}

/// Progress through an end marker, carried from one character to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    search: Search,
    matched: usize,
}

impl Matcher {
    pub const fn new(search: Search) -> Self {
        Self { search, matched: 0 }
    }

    pub fn search(&self) -> Search {
        self.search
    }

    /// Number of marker characters matched so far.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Advance over a character, returning whether it completes `marker`.
    ///
    /// The marker must be non-empty (see [`validate`]) and the same on every
    /// call.
    pub fn advance(&mut self, marker: &[char], c: char) -> bool {
        self.matched = if marker[self.matched] == c {
            self.matched + 1
        } else {
            match self.search {
                Search::Exact => fall_back(marker, self.matched, c),
                Search::Restart => 0,
            }
        };

        if self.matched == marker.len() {
            self.matched = 0;
            true
        } else {
            false
        }
    }
}

/// Length of the longest marker prefix that is a suffix of the first
/// `matched` marker characters followed by `c`.
fn fall_back(marker: &[char], matched: usize, c: char) -> usize {
    (1..=matched)
        .rev()
        .find(|&j| marker[j - 1] == c && marker[..j - 1] == marker[matched + 1 - j..matched])
        .unwrap_or(0)
}
