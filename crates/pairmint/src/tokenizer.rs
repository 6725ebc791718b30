//! # BPE Tokenizer
//!
//! [`BpeTokenizer`] is the user-oriented facade over training, encoding,
//! and decoding. An instance starts untrained, is trained exactly once,
//! and is immutable afterward: encode/decode take `&self` and are safe to
//! share across threads once trained.

use crate::decoders::{decode_bytes, decode_string};
use crate::encoders::EncodeStrategy;
use crate::errors::{PairmintError, Result};
use crate::training::{MergeObserver, MergeStep, PairVocabTrainer, PairVocabTrainerOptions};
use crate::types::{Pair, TokenType};
use crate::vocab::MergeVocab;

/// A byte-level BPE tokenizer.
///
/// State machine with two states: untrained and trained. [`BpeTokenizer::train`]
/// transitions from the first to the second exactly once; encode and decode
/// require the trained state and fail with [`PairmintError::NotTrained`]
/// before it.
#[derive(Debug, Clone, Default)]
pub struct BpeTokenizer<T: TokenType> {
    /// The trained vocabulary; `None` until trained.
    vocab: Option<MergeVocab<T>>,

    /// The encode strategy.
    strategy: EncodeStrategy,
}

impl<T: TokenType> BpeTokenizer<T> {
    /// Create a new, untrained tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, untrained tokenizer with an explicit encode strategy.
    ///
    /// ## Arguments
    /// * `strategy` - the encode strategy; both strategies produce
    ///   identical token streams.
    pub fn with_strategy(strategy: EncodeStrategy) -> Self {
        Self {
            vocab: None,
            strategy,
        }
    }

    /// Reconstruct a trained tokenizer from ordered merge pairs.
    ///
    /// The inverse of `tokenizer.vocab()?.merge_pairs()`; see
    /// [`MergeVocab::from_merge_pairs`].
    ///
    /// ## Arguments
    /// * `pairs` - the merged pairs, in training rank order.
    ///
    /// ## Returns
    /// A `Result` containing the trained tokenizer or an error.
    pub fn from_merge_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Pair<T>>,
    {
        Ok(Self {
            vocab: Some(MergeVocab::from_merge_pairs(pairs)?),
            strategy: EncodeStrategy::default(),
        })
    }

    /// Is this tokenizer trained?
    pub fn is_trained(&self) -> bool {
        self.vocab.is_some()
    }

    /// Get the trained vocabulary.
    ///
    /// The vocabulary is the serialization boundary: its merge records
    /// reconstruct the tokenizer losslessly (see
    /// [`BpeTokenizer::from_merge_pairs`] and [`crate::vocab::io`]).
    ///
    /// ## Returns
    /// A `Result` containing the vocabulary, or
    /// [`PairmintError::NotTrained`].
    pub fn vocab(&self) -> Result<&MergeVocab<T>> {
        self.vocab.as_ref().ok_or(PairmintError::NotTrained)
    }

    /// Train on a byte sequence.
    ///
    /// Performs ``vocab_size - 256`` merge steps (fewer if the sequence is
    /// exhausted first, which is not an error). Atomic: on error, no state
    /// is installed and the tokenizer remains untrained.
    ///
    /// ## Arguments
    /// * `text` - the training bytes.
    /// * `vocab_size` - the target vocabulary size; must be >= 256.
    ///
    /// ## Returns
    /// A `Result` indicating success, or:
    /// * [`PairmintError::VocabSizeTooSmall`] if `vocab_size` < 256.
    /// * [`PairmintError::VocabSizeOverflow`] if `vocab_size` exceeds `T`.
    /// * [`PairmintError::AlreadyTrained`] on a second train call.
    pub fn train<B: AsRef<[u8]>>(
        &mut self,
        text: B,
        vocab_size: usize,
    ) -> Result<()> {
        self.train_observed(text, vocab_size, &mut |_: &MergeStep<T>| {})
    }

    /// Train on a byte sequence, reporting each merge to an observer.
    ///
    /// The observer receives structured [`MergeStep`] records; ambient
    /// progress also goes to the `log` facade.
    ///
    /// ## Arguments
    /// * `text` - the training bytes.
    /// * `vocab_size` - the target vocabulary size; must be >= 256.
    /// * `observer` - the per-merge record sink.
    pub fn train_observed<B, O>(
        &mut self,
        text: B,
        vocab_size: usize,
        observer: &mut O,
    ) -> Result<()>
    where
        B: AsRef<[u8]>,
        O: MergeObserver<T>,
    {
        if self.vocab.is_some() {
            return Err(PairmintError::AlreadyTrained);
        }

        let trainer: PairVocabTrainer =
            PairVocabTrainerOptions::new(vocab_size).init();
        let vocab = trainer.train_observed(text.as_ref(), observer)?;

        self.vocab = Some(vocab);
        Ok(())
    }

    /// Encode bytes into tokens.
    ///
    /// ## Arguments
    /// * `text` - the bytes to encode.
    ///
    /// ## Returns
    /// A `Result` containing the tokens, or
    /// [`PairmintError::NotTrained`].
    pub fn encode<B: AsRef<[u8]>>(
        &self,
        text: B,
    ) -> Result<Vec<T>> {
        Ok(self.strategy.encode(self.vocab()?, text.as_ref()))
    }

    /// Decode tokens into their exact byte expansion.
    ///
    /// ## Arguments
    /// * `tokens` - the token ids to decode.
    ///
    /// ## Returns
    /// A `Result` containing the bytes, or
    /// [`PairmintError::NotTrained`] / [`PairmintError::UnknownToken`].
    pub fn decode_bytes(
        &self,
        tokens: &[T],
    ) -> Result<Vec<u8>> {
        decode_bytes(self.vocab()?, tokens)
    }

    /// Decode tokens into a string.
    ///
    /// Invalid UTF-8 subsequences become U+FFFD; see
    /// [`crate::decoders::decode_string`].
    ///
    /// ## Arguments
    /// * `tokens` - the token ids to decode.
    ///
    /// ## Returns
    /// A `Result` containing the string, or
    /// [`PairmintError::NotTrained`] / [`PairmintError::UnknownToken`].
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> Result<String> {
        decode_string(self.vocab()?, tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrained_guards() {
        type T = u32;
        let tokenizer = BpeTokenizer::<T>::new();

        assert!(!tokenizer.is_trained());
        assert!(matches!(
            tokenizer.encode("hello"),
            Err(PairmintError::NotTrained)
        ));
        assert!(matches!(
            tokenizer.decode(&[104]),
            Err(PairmintError::NotTrained)
        ));
        assert!(matches!(
            tokenizer.decode_bytes(&[104]),
            Err(PairmintError::NotTrained)
        ));
        assert!(tokenizer.vocab().is_err());
    }

    #[test]
    fn test_train_errors_atomic() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();

        assert!(matches!(
            tokenizer.train("abc", 255),
            Err(PairmintError::VocabSizeTooSmall { size: 255 })
        ));

        // A failed train installs nothing.
        assert!(!tokenizer.is_trained());

        tokenizer.train("abc", 256).unwrap();
        assert!(tokenizer.is_trained());

        assert!(matches!(
            tokenizer.train("abc", 300),
            Err(PairmintError::AlreadyTrained)
        ));
    }

    #[test]
    fn test_train_aaabdaaabac() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();
        tokenizer.train("aaabdaaabac", 256 + 3).unwrap();

        let vocab = tokenizer.vocab().unwrap();
        assert_eq!(vocab.num_merges(), 3);
        assert_eq!(vocab.expansion(256), Some("aa".as_bytes()));

        let tokens = tokenizer.encode("aaabdaaabac").unwrap();
        assert_eq!(tokens, vec![258, 100, 258, 97, 99]);

        assert_eq!(tokenizer.decode(&tokens).unwrap(), "aaabdaaabac");
    }

    #[test]
    fn test_empty_encode_decode() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();
        tokenizer.train("banana band", 300).unwrap();

        assert_eq!(tokenizer.encode("").unwrap(), vec![]);
        assert_eq!(tokenizer.decode(&[]).unwrap(), "");
        assert_eq!(tokenizer.decode_bytes(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_byte_identity_decode() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();
        tokenizer.train("some text", 256).unwrap();

        for s in 0..256_u32 {
            assert_eq!(tokenizer.decode_bytes(&[s]).unwrap(), vec![s as u8]);
        }
    }

    #[test]
    fn test_zero_merge_tokenizer() {
        type T = u16;
        let mut tokenizer = BpeTokenizer::<T>::new();

        // vocab_size == 256 trains zero merges; encode passes bytes through.
        tokenizer.train("hello hello", 256).unwrap();
        let tokens = tokenizer.encode("hi").unwrap();
        assert_eq!(tokens, vec![104, 105]);
    }

    #[test]
    fn test_encode_deterministic() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();
        tokenizer
            .train("deterministic determinism determined", 280)
            .unwrap();

        let a = tokenizer.encode("undetermined").unwrap();
        let b = tokenizer.encode("undetermined").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_merge_pairs_roundtrip() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();
        tokenizer.train("to be or not to be", 270).unwrap();

        let pairs = tokenizer.vocab().unwrap().merge_pairs().to_vec();
        let rebuilt = BpeTokenizer::from_merge_pairs(pairs).unwrap();

        assert_eq!(rebuilt.vocab().unwrap(), tokenizer.vocab().unwrap());
        assert_eq!(
            rebuilt.encode("to be or not").unwrap(),
            tokenizer.encode("to be or not").unwrap()
        );
    }

    #[test]
    fn test_observed_training() {
        type T = u32;
        let mut tokenizer = BpeTokenizer::<T>::new();

        let mut seen = vec![];
        tokenizer
            .train_observed("mississippi", 260, &mut |step: &MergeStep<T>| {
                seen.push((step.index, step.token));
            })
            .unwrap();

        let n = tokenizer.vocab().unwrap().num_merges();
        assert_eq!(seen.len(), n);
        assert_eq!(seen[0], (0, 256));
    }
}
