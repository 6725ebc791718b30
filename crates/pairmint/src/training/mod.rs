//! # Vocabulary Training
//!
//! Support for training merge vocabularies.
//!
//! Training consumes a raw byte sequence and a target vocab size, and
//! repeatedly merges the most frequent adjacent symbol pair until the
//! vocabulary is full (or the sequence is exhausted). Each merge mints
//! the next dense token id and records the pair and its byte expansion
//! in a [`crate::vocab::MergeVocab`].
//!
//! Selection is deterministic: highest count first, count ties broken to
//! the lexicographically smallest pair.
//!
//! ## Training Example
//!
//! ```rust
//! use pairmint::training::{PairVocabTrainer, PairVocabTrainerOptions};
//! use pairmint::vocab::MergeVocab;
//!
//! // We can pick any unsigned integer type that fits vocab_size;
//! // see [`pairmint::TokenType`].
//! type T = u32;
//!
//! let trainer: PairVocabTrainer = PairVocabTrainerOptions::new(300).init();
//!
//! let vocab: MergeVocab<T> = trainer
//!     .train(b"low lower lowest")
//!     .expect("training failed");
//!
//! assert!(vocab.num_merges() <= 300 - 256);
//! ```

pub mod utility;

mod bpe_trainer;
mod training_types;

#[doc(inline)]
pub use bpe_trainer::{
    MergeObserver, MergeStep, PairVocabTrainer, PairVocabTrainerOptions,
};
#[doc(inline)]
pub use training_types::CountType;
