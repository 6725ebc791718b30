//! # Training Utilities
//!
//! Frequency accounting and merge application over a symbol sequence:
//! * [`SymbolBuf`] - the mutable sequence, with single-pass non-overlapping
//!   merge rewriting and incremental count deltas.
//! * [`pair_counts`] - from-scratch adjacent-pair counting.

mod pair_index;
mod symbol_buffer;

#[doc(inline)]
pub use pair_index::{PairCountMap, pair_counts};
#[doc(inline)]
pub use symbol_buffer::SymbolBuf;
