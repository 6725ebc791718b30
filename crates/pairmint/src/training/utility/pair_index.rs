//! # Adjacent-Pair Frequency Counting

use crate::training::CountType;
use crate::types::{PMHashMap, Pair, TokenType};

/// A map from [`Pair`] to its occurrence count.
pub type PairCountMap<T, C> = PMHashMap<Pair<T>, C>;

/// Count every adjacent symbol pair in a sequence.
///
/// Scans windows of 2 with stride 1 and tallies occurrences; sequences of
/// length 0 or 1 yield an empty map. Deterministic, no side effects.
///
/// This is the from-scratch reference; the trainer maintains the same
/// counts incrementally from merge deltas
/// (see [`crate::training::utility::SymbolBuf::merge_pair_cb`]).
///
/// # Arguments
/// * `symbols` - the symbol sequence to scan.
pub fn pair_counts<T, C>(symbols: &[T]) -> PairCountMap<T, C>
where
    T: TokenType,
    C: CountType,
{
    let mut counts = PairCountMap::default();

    let one = C::one();
    for w in symbols.windows(2) {
        *counts.entry((w[0], w[1])).or_default() += one;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::utility::SymbolBuf;

    #[test]
    fn test_pair_counts_token_u32_count_usize() {
        test_counts::<u32, usize>();
    }

    #[test]
    fn test_pair_counts_token_u16_count_u64() {
        test_counts::<u16, u64>();
    }

    fn test_counts<T: TokenType, C: CountType>() {
        let buf: SymbolBuf<T> = SymbolBuf::from_text("abcabca");

        assert_eq!(
            pair_counts::<T, C>(buf.symbols()),
            [
                (('a', 'b'), 2),
                (('b', 'c'), 2),
                (('c', 'a'), 2),
            ]
            .into_iter()
            .map(|((a, b), c)| (
                (T::from_u8(a as u8).unwrap(), T::from_u8(b as u8).unwrap()),
                C::from_u32(c).unwrap()
            ))
            .collect::<PairCountMap<T, C>>()
        );
    }

    #[test]
    fn test_pair_counts_short_inputs() {
        assert!(pair_counts::<u32, u64>(&[]).is_empty());
        assert!(pair_counts::<u32, u64>(&[42]).is_empty());
    }

    #[test]
    fn test_pair_counts_overlap() {
        // "aaa" has two (a, a) adjacencies.
        let buf: SymbolBuf<u32> = SymbolBuf::from_text("aaa");
        let counts = pair_counts::<u32, u64>(buf.symbols());
        assert_eq!(counts[&(97, 97)], 2);
    }

    #[test]
    fn test_deltas_match_rescan() {
        // Incremental deltas applied to the old counts must equal a
        // from-scratch recount of the rewritten sequence.
        let mut buf: SymbolBuf<u32> = SymbolBuf::from_text("aaabdaaabac");
        let mut counts = pair_counts::<u32, i64>(buf.symbols());

        buf.merge_pair_cb((97, 97), 256, &mut |p, d| {
            *counts.entry(p).or_default() += d as i64;
        });

        counts.retain(|_, &mut c| c != 0);
        assert_eq!(counts, pair_counts::<u32, i64>(buf.symbols()));
    }
}
