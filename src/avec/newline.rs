//! Line-ending normalizing wrapper.

use crate::sans::newline::LineEndings;

use super::{CharRead, Error};

/// Rewrites `"\r\n"`, `"\r"` and `"\n"` from the wrapped reader to `'\n'`.
///
/// A carriage return ending one read and a line feed starting the next still
/// give a single line feed.
#[derive(Debug)]
pub struct Normalized<C> {
    inner: C,
    endings: LineEndings,
}

impl<C: CharRead> Normalized<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            endings: LineEndings::new(),
        }
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: CharRead> CharRead for Normalized<C> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut len = buf.len();

        loop {
            let n = self.inner.read_chars(&mut buf[..len])?;
            if n == 0 {
                return Ok(0);
            }

            let kept = self.endings.normalize(&mut buf[..n]);
            if kept != 0 {
                return Ok(kept);
            }

            // Everything read was the line feed of a split "\r\n".
            len = 1;
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.close()
    }
}
