//! Slice-based chunk decoding.

use std::{io::Cursor, panic, string::String, thread, vec::Vec};

use super::{
    CharRead, Error,
    split::{Config, Split},
};

extern crate std;

/// Decode every split of an in-memory document, each on its own thread.
///
/// Returns the text of each chunk, in document order. Concatenated, they give
/// the text of the whole document.
pub fn decode(data: &[u8], config: &Config) -> Result<Vec<String>, Error> {
    let splits = config.splits(data.len() as u64);

    thread::scope(|scope| {
        let handles: Vec<_> = splits
            .into_iter()
            .map(|split| scope.spawn(move || decode_split(data, config, split)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
}

/// Decode a single split of an in-memory document.
pub fn decode_split(data: &[u8], config: &Config, split: Split) -> Result<String, Error> {
    let mut chunk = config.open(Cursor::new(data), split)?;

    let mut text = String::new();
    chunk.read_to_string(&mut text)?;
    chunk.close()?;

    Ok(text)
}
