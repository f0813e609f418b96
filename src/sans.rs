//! I/O-free machinery for implementing bounded decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, or that cannot use the standard library. See
//! [`crate::avec`] for implementations covering common patterns.
//!
//! # Architecture
//!
//! Decoding proceeds in steps. A [`Transcoder`] is handed a slice of source
//! bytes and an empty [`transcode::Text`] window; it reports how far it got as
//! a [`Step`]:
//!
//! - [`Step::Underflow`]: every supplied byte was consumed. Supply more, or, if
//! the supplied bytes were the last, the decoder has been flushed.
//!
//! - [`Step::Overflow`]: the text window is full. Drain it and step again with
//! the unconsumed bytes.
//!
//! - [`Step::Malformed`]: a malformed sequence was replaced with U+FFFD. Drain
//! and continue.
//!
//! A [`Budget`] decides which characters are certainly decoded from bytes
//! before the budget and may be delivered unexamined, and a [`Matcher`] finds
//! the end marker among the rest. Neither reads bytes by itself; the following
//! remain the implementation's job:
//!
//! - Keeping a running count of consumed bytes and consulting the budget
//! before each step.
//!
//! - Stepping no further than the budget while characters are delivered
//! unexamined, and one byte at a time after, so that the marker is matched on
//! characters as they arrive rather than on a window reaching past it.
//!
//! Implementers are recommended to begin by studying and modifying a decoder
//! from the [`crate::avec`] module.

pub mod budget;
pub mod marker;
pub mod newline;
pub mod transcode;

pub use budget::{Budget, Plan};
pub use marker::{Matcher, Search};
pub use newline::LineEndings;
pub use transcode::{Step, Transcoder};
