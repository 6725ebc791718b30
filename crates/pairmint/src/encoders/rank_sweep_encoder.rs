//! # Pass-Per-Rank Sweep Encoder

use crate::training::utility::SymbolBuf;
use crate::types::TokenType;
use crate::vocab::MergeVocab;

/// Encode bytes by repeated whole-sequence merge passes.
///
/// Each round selects, among the adjacent pairs present in the merge
/// table, the one with the lowest minted token (the earliest-trained
/// merge), and replaces all of its non-overlapping occurrences; rounds
/// repeat until no adjacent pair is in the table.
///
/// Terminates because every merge strictly shortens the sequence.
///
/// ## Arguments
/// * `vocab` - the trained vocabulary.
/// * `bytes` - the bytes to encode.
///
/// ## Returns
/// The encoded tokens.
pub fn rank_sweep_encode<T: TokenType>(
    vocab: &MergeVocab<T>,
    bytes: &[u8],
) -> Vec<T> {
    let mut seq = SymbolBuf::from_bytes(bytes);

    while seq.len() >= 2 {
        let best = seq
            .pairs()
            .filter_map(|pair| vocab.lookup_pair(&pair).map(|token| (token, pair)))
            .min_by_key(|&(token, _)| token);

        let Some((token, pair)) = best else {
            // Nothing else can be merged.
            break;
        };

        seq.merge_pair(pair, token);
    }

    seq.into_symbols()
}

#[cfg(test)]
mod tests {
    use crate::encoders::EncodeStrategy;
    use crate::encoders::testing::common_encoder_tests;

    #[test]
    fn test_encoder_u16() {
        common_encoder_tests::<u16>(EncodeStrategy::RankSweep);
    }

    #[test]
    fn test_encoder_u32() {
        common_encoder_tests::<u32>(EncodeStrategy::RankSweep);
    }
}
