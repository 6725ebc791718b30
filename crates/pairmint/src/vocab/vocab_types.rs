//! # Vocabulary Type Aliases

use crate::types::{PMHashMap, Pair};

/// Map of ``{ (T, T) -> T }`` merged pairs to minted tokens.
pub type PairTokenMap<T> = PMHashMap<Pair<T>, T>;

/// Map of ``{ T -> Vec<u8> }`` tokens to byte expansions.
pub type TokenSpanMap<T> = PMHashMap<T, Vec<u8>>;
