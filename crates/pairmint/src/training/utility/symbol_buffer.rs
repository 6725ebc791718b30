//! # Symbol Sequence Buffer

use crate::types::{Pair, TokenType};

/// A mutable sequence of symbols.
///
/// Iteratively rewritten by whole-sequence merge passes, both during
/// vocabulary training and while encoding fresh input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolBuf<T: TokenType> {
    symbols: Vec<T>,
}

impl<T: TokenType, S: AsRef<[T]>> From<S> for SymbolBuf<T> {
    fn from(symbols: S) -> Self {
        Self::from_symbols(symbols)
    }
}

impl<T: TokenType> SymbolBuf<T> {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new buffer from symbols.
    pub fn from_symbols<S>(symbols: S) -> Self
    where
        S: AsRef<[T]>,
    {
        Self {
            symbols: symbols.as_ref().to_vec(),
        }
    }

    /// Create a new buffer from a byte slice.
    ///
    /// Each byte becomes the literal-byte symbol equal to its own value.
    ///
    /// # Arguments
    /// * `bytes` - the bytes to translate to byte-literal symbols.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self {
            symbols: bytes
                .as_ref()
                .iter()
                .map(|&b| T::from_u8(b).unwrap())
                .collect(),
        }
    }

    /// Create a new buffer from a string slice, via its UTF-8 bytes.
    ///
    /// # Arguments
    /// * `text` - the text to turn into byte-literal symbols.
    pub fn from_text<S: AsRef<str>>(text: S) -> Self {
        Self::from_bytes(text.as_ref().as_bytes())
    }

    /// View the symbols as a slice.
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }

    /// Take ownership of the underlying symbol vector.
    pub fn into_symbols(self) -> Vec<T> {
        self.symbols
    }

    /// Get the length of the sequence.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is this sequence empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get an iterator over adjacent [`Pair<T>`] windows of this sequence.
    pub fn pairs(&self) -> impl Iterator<Item = Pair<T>> + '_ {
        self.symbols.windows(2).map(|w| (w[0], w[1]))
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// Matching is greedy left-to-right: after a match, the two consumed
    /// symbols cannot participate in another match within the same pass.
    /// Single pass, linear in the sequence length.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the symbol to replace `pair` with.
    pub fn merge_pair(
        &mut self,
        pair: Pair<T>,
        replacement: T,
    ) {
        self.merge_pair_cb(pair, replacement, &mut |_, _| {});
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`,
    /// reporting incremental pair-count deltas.
    ///
    /// The reported deltas, applied to the pre-merge pair counts, yield
    /// exactly the from-scratch pair counts of the rewritten sequence;
    /// this is what lets the trainer avoid a full re-scan per merge.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the symbol to replace `pair` with.
    /// * `on_delta` - a callback invoked for each incremental pair delta:
    ///   - `pair` - the affected adjacency.
    ///   - `delta` - `+1` for an added adjacency, `-1` for a removed one.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair<T>,
        replacement: T,
        on_delta: &mut F,
    ) where
        F: FnMut(Pair<T>, i32),
    {
        let (a, b) = pair;
        let n = self.symbols.len();

        if n < 2 {
            // Single-symbol sequences have no pairs to merge.
            return;
        }

        let mut new_symbols: Vec<T> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = self.symbols[i];

            if i + 1 < n && pair == (current, self.symbols[i + 1]) {
                // Remove Previous Pair?
                if let Some(&x) = new_symbols.last() {
                    on_delta((x, a), Self::DEC);
                    on_delta((x, replacement), Self::INC);
                }

                // Remove Current Pair.
                on_delta(pair, Self::DEC);

                // Remove Next Pair?
                if i + 2 < n {
                    let y = self.symbols[i + 2];
                    on_delta((b, y), Self::DEC);
                    on_delta((replacement, y), Self::INC);
                };

                new_symbols.push(replacement);

                // Skip 'a' and 'b'.
                i += 2;
            } else {
                new_symbols.push(current);
                i += 1;
            }
        }

        self.symbols = new_symbols;
    }
}
