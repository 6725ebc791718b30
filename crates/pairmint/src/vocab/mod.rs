//! # Vocabulary
//!
//! This module provides the trained vocabulary and related io mechanisms.
//!
//! The central type is [`MergeVocab`], which holds, in lockstep:
//! * the merge table: a ``{ (T, T) -> T }`` lookup plus the rank-ordered
//!   list of merged pairs (index ``i`` mints token ``256 + i``),
//! * the expansion table: ``{ T -> Vec<u8> }``, seeded with the 256
//!   single-byte identity entries.
//!
//! A merge's priority during encoding is its minted token value;
//! lower means trained earlier, and earlier merges win.

pub mod io;

pub mod merge_vocab;
pub mod size_hints;
pub mod vocab_types;

#[doc(inline)]
pub use merge_vocab::{BYTE_VOCAB_SIZE, MergeVocab};
#[doc(inline)]
pub use vocab_types::{PairTokenMap, TokenSpanMap};
