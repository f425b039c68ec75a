//! Protocol decoders.
//!
//! Each protocol follows a layered structure:
//! - `layout`: row numbers, frame lengths, byte offsets, masks and scales
//!   (source of truth)
//! - `parser`: frame checks and field extraction through a bounded
//!   `RowReader` (no direct buffer indexing)
//! - `mod`: the device descriptor and the `Decoder` that turns a parsed
//!   reading into a record
//!
//! Parsers are pure; a buffer that does not fit the protocol yields
//! `Ok(None)`, and only buffer invariant violations are errors.

pub(crate) mod common;
pub mod rubicson;
pub mod test_sensor;
