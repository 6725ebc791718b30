//! # Vocabulary IO
//!
//! Line-oriented io over the vocabulary's merge records.
//!
//! The model format is versioned and minimal: a header line, then one
//! ``{LEFT} {RIGHT}`` line per merge in rank order. Minted token ids are
//! implicit (dense from 256), so the file reconstructs the vocabulary
//! losslessly; see [`crate::vocab::MergeVocab::from_merge_pairs`].

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::errors::{PairmintError, Result};
use crate::types::{Pair, TokenType};
use crate::vocab::MergeVocab;

/// The model file header line.
pub const MODEL_HEADER: &str = "pairmint v1";

/// Save a [`MergeVocab`] merge list to a model file.
///
/// Lines are:
/// ```terminaloutput
/// pairmint v1
/// {LEFT} {RIGHT}
/// ```
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the model to.
pub fn save_merge_list_path<T: TokenType, P: AsRef<Path>>(
    vocab: &MergeVocab<T>,
    path: P,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_merge_list(vocab, &mut writer)
}

/// Write a [`MergeVocab`] merge list to a [`Write`] writer.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_merge_list<T, W>(
    vocab: &MergeVocab<T>,
    writer: &mut W,
) -> Result<()>
where
    T: TokenType,
    W: Write,
{
    writeln!(writer, "{}", MODEL_HEADER)?;
    for &(left, right) in vocab.merge_pairs() {
        writeln!(
            writer,
            "{} {}",
            left.to_u64().unwrap(),
            right.to_u64().unwrap()
        )?;
    }
    Ok(())
}

/// Load a [`MergeVocab`] from a model file.
///
/// # Arguments
/// * `path` - the path to the model file.
pub fn load_merge_list_path<T, P>(path: P) -> Result<MergeVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_merge_list(reader)
}

/// Read a [`MergeVocab`] from a model line reader.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_merge_list<T, R>(reader: R) -> Result<MergeVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| PairmintError::Parse("empty model file".into()))??;
    if header.trim() != MODEL_HEADER {
        return Err(PairmintError::Parse(format!(
            "bad model header: {header:?}"
        )));
    }

    let mut pairs: Vec<Pair<T>> = Vec::new();
    for line in lines {
        let line = line?;

        let parts = line.split_whitespace().collect::<Vec<&str>>();
        if parts.len() != 2 {
            return Err(PairmintError::Parse(format!(
                "bad merge line: {line:?}"
            )));
        }

        let mut pair = [T::zero(); 2];
        for (slot, part) in pair.iter_mut().zip(parts) {
            let id: u64 = part
                .parse()
                .map_err(|e: core::num::ParseIntError| {
                    PairmintError::Parse(e.to_string())
                })?;
            *slot = T::from_u64(id).ok_or(PairmintError::TokenOutOfRange)?;
        }

        pairs.push((pair[0], pair[1]));
    }

    MergeVocab::from_merge_pairs(pairs)
}

/// Save a [`MergeVocab`] token dictionary to a base64 vocab file.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 SPAN} {TOKEN}
/// ```
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_span_map_path<T: TokenType, P: AsRef<Path>>(
    vocab: &MergeVocab<T>,
    path: P,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_span_map(vocab, &mut writer)
}

/// Write a [`MergeVocab`] token dictionary to a [`Write`] writer.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 SPAN} {TOKEN}
/// ```
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_base64_span_map<T, W>(
    vocab: &MergeVocab<T>,
    writer: &mut W,
) -> Result<()>
where
    T: TokenType,
    W: Write,
{
    let mut items: Vec<(T, Vec<u8>)> = vocab.token_spans().into_iter().collect();
    items.sort_by_key(|(t, _)| *t);

    for (token, span) in items {
        writeln!(
            writer,
            "{} {}",
            BASE64_STANDARD.encode(&span),
            token.to_u64().unwrap()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vocab<T: TokenType>() -> MergeVocab<T> {
        let pairs = [(97, 98), (256, 99), (257, 257)]
            .into_iter()
            .map(|(a, b)| (T::from_u32(a).unwrap(), T::from_u32(b).unwrap()));
        MergeVocab::from_merge_pairs(pairs).unwrap()
    }

    #[test]
    fn test_merge_list_roundtrip() {
        type T = u32;
        let vocab = test_vocab::<T>();

        let mut buf: Vec<u8> = vec![];
        write_merge_list(&vocab, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "pairmint v1\n97 98\n256 99\n257 257\n"
        );

        let loaded: MergeVocab<T> = read_merge_list(buf.as_slice()).unwrap();
        assert_eq!(loaded, vocab);
    }

    #[test]
    fn test_merge_list_path_roundtrip() {
        type T = u16;
        let vocab = test_vocab::<T>();

        tempdir::TempDir::new("pairmint_test")
            .and_then(|dir| {
                let path = dir.path().join("tokenizer.model");

                save_merge_list_path(&vocab, &path).expect("Failed to save model");

                let loaded: MergeVocab<T> =
                    load_merge_list_path(&path).expect("Failed to load model");
                assert_eq!(&loaded, &vocab);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_read_merge_list_errors() {
        type T = u32;

        let empty: &[u8] = b"";
        assert!(matches!(
            read_merge_list::<T, _>(empty),
            Err(PairmintError::Parse(_))
        ));

        let bad_header: &[u8] = b"pairmint v9\n1 2\n";
        assert!(matches!(
            read_merge_list::<T, _>(bad_header),
            Err(PairmintError::Parse(_))
        ));

        let bad_line: &[u8] = b"pairmint v1\n1 2 3\n";
        assert!(matches!(
            read_merge_list::<T, _>(bad_line),
            Err(PairmintError::Parse(_))
        ));

        let bad_int: &[u8] = b"pairmint v1\none two\n";
        assert!(matches!(
            read_merge_list::<T, _>(bad_int),
            Err(PairmintError::Parse(_))
        ));

        // Undefined parents are a vocabulary conflict, not a parse error.
        let bad_parent: &[u8] = b"pairmint v1\n300 1\n";
        assert!(matches!(
            read_merge_list::<T, _>(bad_parent),
            Err(PairmintError::VocabConflict(_))
        ));

        let out_of_range: &[u8] = b"pairmint v1\n99999999999 1\n";
        assert!(matches!(
            read_merge_list::<u16, _>(out_of_range),
            Err(PairmintError::TokenOutOfRange)
        ));
    }

    #[test]
    fn test_write_base64_span_map() {
        type T = u32;
        let vocab = test_vocab::<T>();

        let mut buf: Vec<u8> = vec![];
        write_base64_span_map(&vocab, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), vocab.len());

        // Rank-sorted: byte 'a' at line 97, merges at the tail.
        assert_eq!(lines[97], format!("{} 97", BASE64_STANDARD.encode(b"a")));
        assert_eq!(
            lines[257],
            format!("{} 257", BASE64_STANDARD.encode(b"abc"))
        );
        assert_eq!(
            lines[258],
            format!("{} 258", BASE64_STANDARD.encode(b"abcabc"))
        );
    }
}
