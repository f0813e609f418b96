//! Byte budget bookkeeping and safe-prefix planning.

/// Number of source bytes after which end marker matching begins.
///
/// A budget is fixed when a decoder is opened and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget(u64);

/// How much of a request may be decoded without examining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Every requested character is decoded from bytes before the budget.
    Direct,
    /// The first `n` requested characters are decoded from bytes before the
    /// budget.
    Prefix(usize),
    /// Characters must be decoded and examined one at a time.
    Scan,
}

impl Budget {
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Bytes that may still be consumed before the budget is reached.
    pub const fn remaining(self, consumed: u64) -> u64 {
        self.0.saturating_sub(consumed)
    }

    /// Whether a character ending at byte `position` lies past the budget.
    pub const fn is_exceeded(self, position: u64) -> bool {
        position > self.0
    }

    /// Plan a request for `requested` characters when `position` bytes have
    /// been consumed, given the encoding's widest character.
    ///
    /// The plan holds for any `position` at or beyond the true decode
    /// position, so an over-estimate (such as a count of bytes buffered ahead
    /// of the decoder) only makes it more cautious.
    pub fn plan(self, position: u64, requested: usize, max_bytes_per_char: usize) -> Plan {
        let remaining = self.remaining(position);
        let max = max_bytes_per_char.max(1) as u64;

        if (requested as u64).saturating_mul(max) < remaining {
            Plan::Direct
        } else if remaining > max {
            let n = usize::try_from(remaining / max).unwrap_or(usize::MAX);
            Plan::Prefix(n.min(requested))
        } else {
            Plan::Scan
        }
    }
}
