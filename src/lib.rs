#![no_std]

//! Charset-aware bounded decoders for splitting delimited text into
//! independently decodable chunks.
//!
//! A large delimited-text document is cut into byte ranges. Each range is
//! decoded on its own, reading past its nominal byte budget until a record
//! boundary (the end marker) so that no record and no multi-byte character is
//! ever split between two chunks.
//!
//! Most users should begin with the decoders and wrappers in the [`avec`]
//! module, or let [`avec::split::Config`] plan and open chunks of a file. The
//! I/O-free machinery underneath (text decoding steps, budget planning, marker
//! matching and line-ending compaction) is exposed in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoders (default).

#[cfg(feature = "std")]
pub mod avec;
pub mod sans;
