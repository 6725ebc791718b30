//! # Token Decoders
//!
//! Decoding is a pure expansion-table lookup and concatenation:
//! * [`decode_bytes`] - exact byte reconstruction; fails on unknown ids.
//! * [`decode_string`] - byte reconstruction reinterpreted as UTF-8, with
//!   U+FFFD substituted for invalid byte subsequences (total over valid
//!   ids; token boundaries need not align with character boundaries).

mod span_decoder;

#[doc(inline)]
pub use span_decoder::{decode_bytes, decode_string};
