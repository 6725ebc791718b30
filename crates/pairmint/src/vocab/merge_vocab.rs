//! # Merge ``{ (T, T) -> T }`` + Expansion ``{ T -> Vec<u8> }`` Vocabulary

use core::fmt::Debug;

use crate::errors::{PairmintError, Result};
use crate::types::{Pair, TokenType};
use crate::vocab::vocab_types::{PairTokenMap, TokenSpanMap};

/// The number of byte-literal tokens (the u8 space).
///
/// Tokens below this value expand to the single byte equal to their own
/// value; tokens at or above it are minted merge results.
pub const BYTE_VOCAB_SIZE: usize = 256;

/// A trained BPE vocabulary: merge table and expansion table in lockstep.
///
/// Append-only: each [`MergeVocab::push_merge`] mints the next dense token
/// id (``256 + rank``), records the merged pair at that rank, and installs
/// the concatenated byte expansion. Nothing is ever removed or rewritten,
/// so a merge's priority during encoding is simply its minted token value.
#[derive(Clone, PartialEq)]
pub struct MergeVocab<T: TokenType> {
    /// Map of ``{ (T, T) -> T }`` merged pairs to minted tokens.
    pairs: PairTokenMap<T>,

    /// Merged pairs in rank order; index ``i`` minted token ``256 + i``.
    merges: Vec<Pair<T>>,

    /// Byte expansion per token, indexed by token value.
    ///
    /// The first 256 entries are the single-byte identity expansions.
    spans: Vec<Vec<u8>>,
}

impl<T: TokenType> Debug for MergeVocab<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MergeVocab")
            .field("len", &self.len())
            .field("num_merges", &self.num_merges())
            .finish()
    }
}

impl<T: TokenType> Default for MergeVocab<T> {
    fn default() -> Self {
        let spans = (0..=u8::MAX).map(|b| vec![b]).collect();
        Self {
            pairs: PairTokenMap::default(),
            merges: Vec::new(),
            spans,
        }
    }
}

impl<T: TokenType> MergeVocab<T> {
    /// Rebuild a [`MergeVocab`] from ordered merge pairs.
    ///
    /// Minted token ids are dense from 256, so the ordered pairs alone are
    /// a lossless serialization of the vocabulary; expansions are re-derived
    /// deterministically.
    ///
    /// ## Arguments
    /// * `pairs` - the merged pairs, in training rank order.
    ///
    /// ## Returns
    /// A `Result` containing the reconstructed `MergeVocab` or an error.
    pub fn from_merge_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Pair<T>>,
    {
        let mut vocab = Self::default();
        for pair in pairs {
            vocab.push_merge(pair)?;
        }
        Ok(vocab)
    }

    /// Get the number of tokens in the vocabulary.
    ///
    /// ## Returns
    /// The total number of tokens (bytes + merges).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Get the number of recorded merges.
    pub fn num_merges(&self) -> usize {
        self.merges.len()
    }

    /// Gets the highest minted token.
    pub fn max_token(&self) -> T {
        T::from_usize(self.spans.len() - 1).unwrap()
    }

    /// Is this token defined in the vocabulary?
    #[inline(always)]
    pub fn contains_token(
        &self,
        token: T,
    ) -> bool {
        token.to_usize().is_some_and(|t| t < self.spans.len())
    }

    /// Looks up a merged pair.
    ///
    /// ## Arguments
    /// * `pair` - The pair of tokens to look up.
    ///
    /// ## Returns
    /// The minted token for the pair, if it was merged during training.
    /// The token value doubles as the merge's encode priority.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<T> {
        self.pairs.get(pair).copied()
    }

    /// Get the byte expansion of a token, if defined.
    ///
    /// ## Arguments
    /// * `token` - The token to look up.
    #[inline(always)]
    pub fn expansion(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        token
            .to_usize()
            .and_then(|t| self.spans.get(t))
            .map(Vec::as_slice)
    }

    /// Record a merge, minting the next dense token id.
    ///
    /// Installs the merge-table entry and the concatenated byte expansion
    /// in lockstep.
    ///
    /// ## Arguments
    /// * `pair` - the pair being merged; both parents must be defined.
    ///
    /// ## Returns
    /// A `Result` containing the minted token or an error.
    pub fn push_merge(
        &mut self,
        pair: Pair<T>,
    ) -> Result<T> {
        let (left, right) = pair;
        for parent in [left, right] {
            if !self.contains_token(parent) {
                return Err(PairmintError::VocabConflict(format!(
                    "merge pair {pair:?} parent {parent} is not defined"
                )));
            }
        }
        if let Some(token) = self.pairs.get(&pair) {
            return Err(PairmintError::VocabConflict(format!(
                "merge pair {pair:?} already minted token {token}"
            )));
        }

        let size = self.spans.len() + 1;
        let token = T::from_usize(self.spans.len())
            .ok_or(PairmintError::VocabSizeOverflow { size })?;

        let left_span = self.expansion(left).unwrap();
        let right_span = self.expansion(right).unwrap();
        let mut span = Vec::with_capacity(left_span.len() + right_span.len());
        span.extend_from_slice(left_span);
        span.extend_from_slice(right_span);

        self.pairs.insert(pair, token);
        self.merges.push(pair);
        self.spans.push(span);

        Ok(token)
    }

    /// View the merged pairs in rank order.
    pub fn merge_pairs(&self) -> &[Pair<T>] {
        &self.merges
    }

    /// Generate the ordered ``(left, right, minted)`` merge records.
    ///
    /// Sufficient to reconstruct both the merge table and the expansion
    /// table deterministically; see [`MergeVocab::from_merge_pairs`].
    pub fn merge_records(&self) -> impl Iterator<Item = (T, T, T)> + '_ {
        self.merges.iter().enumerate().map(|(rank, &(left, right))| {
            (left, right, T::from_usize(BYTE_VOCAB_SIZE + rank).unwrap())
        })
    }

    /// Generate the full ``{ T -> Vec<u8> }`` token dictionary.
    pub fn token_spans(&self) -> TokenSpanMap<T> {
        self.spans
            .iter()
            .enumerate()
            .map(|(t, span)| (T::from_usize(t).unwrap(), span.clone()))
            .collect()
    }
}
