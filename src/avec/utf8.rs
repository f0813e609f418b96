//! UTF-8 byte bridge for byte-oriented tokenizers.

use std::io::{self, Read};

use super::CharRead;

extern crate std;

// Characters requested from the wrapped reader per read.
const BATCH: usize = 256;

/// Re-encodes characters from the wrapped reader as UTF-8, for consumers such
/// as CSV tokenizers that read bytes.
///
/// A character that does not fit the caller's buffer is carried over to the
/// next read.
#[derive(Debug)]
pub struct Utf8Reader<C> {
    inner: C,
    carry: [u8; 4],
    carry_start: usize,
    carry_end: usize,
}

impl<C: CharRead> Utf8Reader<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            carry: [0; 4],
            carry_start: 0,
            carry_end: 0,
        }
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: CharRead> Read for Utf8Reader<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.carry_start < self.carry_end {
            let carried = &self.carry[self.carry_start..self.carry_end];
            let n = carried.len().min(buf.len());
            buf[..n].copy_from_slice(&carried[..n]);
            self.carry_start += n;
            return Ok(n);
        }

        // Every requested character fits unless the buffer is under four bytes.
        let mut chars = ['\0'; BATCH];
        let want = (buf.len() / 4).clamp(1, BATCH);
        let n = self.inner.read_chars(&mut chars[..want])?;

        let mut written = 0;

        for c in &chars[..n] {
            let len = c.len_utf8();

            if written + len <= buf.len() {
                c.encode_utf8(&mut buf[written..]);
                written += len;
            } else {
                debug_assert_eq!(n, 1);
                c.encode_utf8(&mut self.carry);
                let fit = buf.len() - written;
                buf[written..].copy_from_slice(&self.carry[..fit]);
                self.carry_start = fit;
                self.carry_end = len;
                written = buf.len();
                break;
            }
        }

        Ok(written)
    }
}
