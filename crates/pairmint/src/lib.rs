//! # `pairmint` Byte-Level BPE Tokenizer
//!
//! `pairmint` trains byte-level Byte Pair Encoding vocabularies and applies
//! them to encode/decode token streams. Tokenization is deterministic and
//! byte-exact reversible: for any input, decoding the encoded tokens
//! reproduces the original bytes.
//!
//! See:
//! * [`tokenizer`] for the [`tokenizer::BpeTokenizer`] train/encode/decode facade.
//! * [`training`] to train a [`vocab::MergeVocab`] directly.
//! * [`encoders`] / [`decoders`] for the underlying strategies.
//! * [`vocab`] to manage trained vocabularies and vocab io.
//!
//! There is no pre-tokenization split pattern and there are no special
//! tokens: the symbol space is raw bytes plus minted merges, nothing else.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is
//! a performance win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::PMHash{*}`` type alias machinery.
//!
//! ## Example
//!
//! ```rust
//! use pairmint::tokenizer::BpeTokenizer;
//!
//! let mut tokenizer: BpeTokenizer<u32> = BpeTokenizer::new();
//! tokenizer.train("a tale of two tokenizers", 300)?;
//!
//! let tokens = tokenizer.encode("two tales")?;
//! assert_eq!(tokenizer.decode(&tokens)?, "two tales");
//! # Ok::<(), pairmint::PairmintError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{PairmintError, Result};
#[doc(inline)]
pub use tokenizer::BpeTokenizer;
#[doc(inline)]
pub use types::{Pair, TokenType};
