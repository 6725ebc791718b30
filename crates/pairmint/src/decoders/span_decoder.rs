//! # Expansion-Table Token Decoder

use crate::errors::{PairmintError, Result};
use crate::types::TokenType;
use crate::vocab::MergeVocab;
use crate::vocab::size_hints::EXPECTED_BYTES_PER_TOKEN;

/// Decode tokens into their exact byte expansion.
///
/// No partial output: the first token with no vocabulary expansion fails
/// the whole call, carrying the offending id.
///
/// ## Arguments
/// * `vocab` - the trained vocabulary.
/// * `tokens` - the token ids to decode.
///
/// ## Returns
/// A `Result` containing the concatenated bytes or
/// [`PairmintError::UnknownToken`].
pub fn decode_bytes<T: TokenType>(
    vocab: &MergeVocab<T>,
    tokens: &[T],
) -> Result<Vec<u8>> {
    let capacity = (tokens.len() as f32 * EXPECTED_BYTES_PER_TOKEN) as usize;
    let mut value = Vec::with_capacity(capacity);

    for &t in tokens {
        match vocab.expansion(t) {
            Some(span) => value.extend_from_slice(span),
            None => {
                return Err(PairmintError::UnknownToken {
                    token: t.to_u64().unwrap_or(u64::MAX),
                });
            }
        }
    }

    Ok(value)
}

/// Decode tokens into a string.
///
/// Byte subsequences that are not valid UTF-8 are replaced with U+FFFD
/// REPLACEMENT CHARACTER; token ids may split multi-byte characters, so
/// this is not an error.
///
/// ## Arguments
/// * `vocab` - the trained vocabulary.
/// * `tokens` - the token ids to decode.
///
/// ## Returns
/// A `Result` containing the decoded string or
/// [`PairmintError::UnknownToken`].
pub fn decode_string<T: TokenType>(
    vocab: &MergeVocab<T>,
    tokens: &[T],
) -> Result<String> {
    let bytes = decode_bytes(vocab, tokens)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
