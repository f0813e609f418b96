//! Owned byte source with a reusable read buffer.

use std::{
    boxed::Box,
    io::{ErrorKind, Read},
    vec,
};

use super::Error;

extern crate std;

/// A byte source, exclusively owned, read forward into a fixed buffer.
pub(crate) struct Source<R> {
    inner: Option<R>,
    buf: Box<[u8]>,
    head: usize, // Start of the unconsumed bytes.
    tail: usize, // End of the bytes read.
    exhausted: bool,
}

impl<R: Read> Source<R> {
    pub(crate) fn new(inner: R, capacity: usize) -> Self {
        Self {
            inner: Some(inner),
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            tail: 0,
            exhausted: false,
        }
    }

    /// Bytes read from the source and not yet consumed.
    pub(crate) fn available(&self) -> &[u8] {
        &self.buf[self.head..self.tail]
    }

    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(self.head + n <= self.tail);
        self.head += n;
    }

    /// Whether the source has signalled its end.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Read from the source if every buffered byte has been consumed.
    ///
    /// Afterward, either some bytes are available or the source is exhausted.
    pub(crate) fn fill(&mut self) -> Result<(), Error> {
        if self.head < self.tail || self.exhausted {
            return Ok(());
        }

        let inner = self.inner.as_mut().ok_or(Error::Closed)?;

        self.head = 0;
        self.tail = 0;

        loop {
            match inner.read(&mut self.buf) {
                Ok(0) => {
                    self.exhausted = true;
                    log::trace!("byte source exhausted");
                    return Ok(());
                }
                Ok(n) => {
                    self.tail = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    pub(crate) fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    /// Drop the source and any buffered bytes, returning the source if it was
    /// still open.
    pub(crate) fn close(&mut self) -> Option<R> {
        self.head = 0;
        self.tail = 0;
        self.inner.take()
    }
}
