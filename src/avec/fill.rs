//! Full-fill buffering wrapper.

use std::io::ErrorKind;

use super::{CharRead, Error};

extern crate std;

/// Keeps reading the wrapped reader until a request is filled.
///
/// Some readers return fewer characters than requested while more are
/// available. Through this wrapper, a read returns short only at the end of
/// the stream, or when the wrapped reader would block after some characters
/// have been gathered.
#[derive(Debug)]
pub struct FullFill<C> {
    inner: C,
}

impl<C: CharRead> FullFill<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: CharRead> CharRead for FullFill<C> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize, Error> {
        let mut n = 0;

        while n < buf.len() {
            match self.inner.read_chars(&mut buf[n..]) {
                Ok(0) => break,
                Ok(read) => n += read,
                Err(Error::Io(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Err(Error::Io(e)) if e.kind() == ErrorKind::WouldBlock && n != 0 => break,
                Err(e) => return Err(e),
            }
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.close()
    }
}
