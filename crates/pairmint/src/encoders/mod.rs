//! # Symbol Encoders
//!
//! Encoding applies a trained merge table to fresh bytes: among the
//! adjacent pairs present in the table, the merge with the lowest minted
//! token (the earliest-trained merge) is always applied first. Input
//! frequency is irrelevant; only trained priority matters.
//!
//! Two strategies with identical observable output:
//! * [`rank_sweep_encode`] - the reference pass-per-rank loop.
//! * [`PriorityMergeEncoder`] - a min-heap over a doubly-linked list,
//!   O(n log n) per input.

mod priority_merge_encoder;
mod rank_sweep_encoder;

#[doc(inline)]
pub use priority_merge_encoder::PriorityMergeEncoder;
#[doc(inline)]
pub use rank_sweep_encoder::rank_sweep_encode;

use crate::types::TokenType;
use crate::vocab::MergeVocab;
use crate::vocab::size_hints::EXPECTED_BYTES_PER_TOKEN;

/// Selects the encode strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodeStrategy {
    /// Pass-per-rank sweep; linear scans, simplest possible.
    RankSweep,

    /// Heap-driven merging; the default.
    #[default]
    PriorityMerge,
}

impl EncodeStrategy {
    /// Encode bytes against a trained vocabulary.
    ///
    /// ## Arguments
    /// * `vocab` - the trained vocabulary.
    /// * `bytes` - the bytes to encode.
    ///
    /// ## Returns
    /// The encoded tokens.
    pub fn encode<T: TokenType>(
        &self,
        vocab: &MergeVocab<T>,
        bytes: &[u8],
    ) -> Vec<T> {
        match self {
            EncodeStrategy::RankSweep => rank_sweep_encode(vocab, bytes),
            EncodeStrategy::PriorityMerge => {
                let capacity =
                    (bytes.len() as f32 / (EXPECTED_BYTES_PER_TOKEN * 0.5)) as usize;
                let mut tokens = Vec::with_capacity(capacity);
                let mut encoder = PriorityMergeEncoder::default();
                encoder.encode_append(vocab, bytes, &mut tokens);
                tokens
            }
        }
    }
}
