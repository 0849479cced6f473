use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::engine::Engine;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bulk-load a line-oriented word list into the engine: one word per line,
/// trailing CR/LF stripped, blank lines skipped. Lines longer than
/// `max_word_len` characters are skipped with a warning rather than
/// truncated, so a stored word is always exactly what the file said.
///
/// Returns the number of words added (duplicate lines add nothing).
pub fn load_wordlist(
    path: &Path,
    engine: &Engine,
    max_word_len: usize,
) -> Result<usize, ImportError> {
    log::info!("loading dictionary from {} ...", path.display());

    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut added = 0;
    let mut too_long = 0;

    for line in reader.lines() {
        let line = line?;
        let word = line.trim_end_matches('\r');

        if word.is_empty() {
            continue;
        }
        if word.len() > max_word_len {
            too_long += 1;
            continue;
        }

        if engine.bulk_insert(word) {
            added += 1;
        }
    }

    if too_long > 0 {
        log::warn!(
            "skipped {} dictionary lines longer than {} characters",
            too_long,
            max_word_len
        );
    }

    Ok(added)
}
