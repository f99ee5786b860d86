//! Reading and writing the data file
//!
//! The file is plain text with one word per line. Lines come in pairs: an English word, then one of
//! its Polish translations. A word with several translations appears once per translation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};

/// Checks that `word` can be stored as a single line of the data file
pub fn validate_word(word: &str) -> Result<()> {
    if word.is_empty() || word.contains(|c: char| c == '\n' || c == '\r') {
        return Err(Error::invalid_word(word));
    }

    Ok(())
}

/// Loads the dictionary stored at `path`
///
/// A missing file is not an error: it yields an empty dictionary, and the file is created by the
/// first write.
pub fn load(path: impl AsRef<Path>) -> Result<Dictionary> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("{} does not exist yet, starting with an empty dictionary", path.display());
            return Ok(Dictionary::new());
        },
        Err(err) => return Err(err.into()),
    };

    let dictionary = read_pairs(BufReader::new(file))?;
    log::info!("loaded {} words from {}", dictionary.len(), path.display());
    Ok(dictionary)
}

/// Reads alternating English/Polish lines into a fresh dictionary
///
/// An unpaired trailing line is skipped, as is any pair with an empty word.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Dictionary> {
    let mut dictionary = Dictionary::new();
    let mut lines = reader.lines();
    let mut line_number = 0;

    while let Some(english) = lines.next() {
        let english = english?;
        line_number += 1;
        let polish = match lines.next() {
            Some(polish) => polish?,
            None => {
                log::warn!("line {}: ignoring {:?}, it has no translation", line_number, english);
                break;
            },
        };
        line_number += 1;

        if english.is_empty() || polish.is_empty() {
            log::warn!("line {}: skipping pair with an empty word", line_number - 1);
            continue;
        }

        dictionary.add_translation(&english, &polish);
    }

    Ok(dictionary)
}

/// Writes every pair of `dictionary` as alternating lines, English words in ascending order
///
/// Every word is checked with `validate_word` before the first line goes out.
pub fn write_pairs<W: Write>(mut writer: W, dictionary: &Dictionary) -> Result<()> {
    for (english, polish) in dictionary.pairs() {
        validate_word(english)?;
        validate_word(polish)?;
    }

    for (english, polish) in dictionary.pairs() {
        writeln!(writer, "{}", english)?;
        writeln!(writer, "{}", polish)?;
    }
    writer.flush()?;

    Ok(())
}

/// Replaces the contents of `path` with `dictionary`
///
/// The file is left alone if any word cannot be stored.
pub fn save(path: impl AsRef<Path>, dictionary: &Dictionary) -> Result<()> {
    let path = path.as_ref();
    let mut contents = Vec::new();
    write_pairs(&mut contents, dictionary)?;
    fs::write(path, contents)?;
    log::info!("saved {} words to {}", dictionary.len(), path.display());

    Ok(())
}

/// Appends a single pair to the end of `path`, creating the file if needed
pub fn append(path: impl AsRef<Path>, english: &str, polish: &str) -> Result<()> {
    validate_word(english)?;
    validate_word(polish)?;

    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(format!("{}\n{}\n", english, polish).as_bytes())?;
    log::debug!("appended {:?} => {:?} to {}", english, polish, path.display());

    Ok(())
}
