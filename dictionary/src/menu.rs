//! Interactive menu over a dictionary and its data file

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::store;

const MENU: &str = "\
1. Find translations
2. Add translation
3. Remove translation
4. Reload from file
5. Quit";

/// A dictionary kept in step with the data file it was loaded from
///
/// Additions are appended to the file as they happen. Removals rewrite the whole file, since a pair
/// cannot be cut out of the middle of it in place.
#[derive(Debug)]
pub struct Session {
    dictionary: Dictionary,
    data_file: PathBuf,
}

impl Session {
    /// Loads `data_file`, which does not have to exist yet
    pub fn open(data_file: impl Into<PathBuf>) -> Result<Self> {
        let data_file = data_file.into();
        let dictionary = store::load(&data_file)?;

        Ok(Self {dictionary, data_file})
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Translations of `english`, empty if it is unknown
    pub fn find(&self, english: &str) -> &[String] {
        self.dictionary.translations(english)
    }

    /// Adds a pair and appends it to the data file
    ///
    /// Returns `false` without touching the file if the pair was already known. The in-memory
    /// dictionary only changes once the file has been written.
    pub fn add(&mut self, english: &str, polish: &str) -> Result<bool> {
        if self.dictionary.translations(english).iter().any(|known| known == polish) {
            return Ok(false);
        }

        store::append(&self.data_file, english, polish)?;
        self.dictionary.add_translation(english, polish);

        Ok(true)
    }

    /// Removes a pair and rewrites the data file
    ///
    /// Returns `false` without touching the file if the pair was not known. If the file cannot be
    /// rewritten the in-memory dictionary is left as it was.
    pub fn remove(&mut self, english: &str, polish: &str) -> Result<bool> {
        let mut updated = self.dictionary.clone();
        if !updated.remove_translation(english, polish)? {
            return Ok(false);
        }

        store::save(&self.data_file, &updated)?;
        self.dictionary = updated;

        Ok(true)
    }

    /// Replaces the in-memory dictionary with the current contents of the data file
    pub fn reload(&mut self) -> Result<()> {
        self.dictionary = store::load(&self.data_file)?;
        Ok(())
    }

    /// Runs the menu until the user quits or `input` runs out
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        loop {
            writeln!(output, "{}", MENU)?;
            let choice = match prompt(&mut input, &mut output, "Choose an option:")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.as_str() {
                "1" => {
                    let english = match prompt(&mut input, &mut output, "English word:")? {
                        Some(english) => english,
                        None => return Ok(()),
                    };

                    let translations = self.find(&english);
                    if translations.is_empty() {
                        writeln!(output, "No translations of {:?}", english)?;
                    }
                    for polish in translations {
                        writeln!(output, "{}", polish)?;
                    }
                },

                "2" => {
                    let (english, polish) = match prompt_pair(&mut input, &mut output)? {
                        Some(pair) => pair,
                        None => return Ok(()),
                    };

                    match self.add(&english, &polish) {
                        Ok(true) => writeln!(output, "Added {} => {}", english, polish)?,
                        Ok(false) => writeln!(output, "{} => {} is already known", english, polish)?,
                        Err(err @ Error::InvalidWord(_)) => writeln!(output, "{}", err)?,
                        Err(err) => return Err(err),
                    }
                },

                "3" => {
                    let (english, polish) = match prompt_pair(&mut input, &mut output)? {
                        Some(pair) => pair,
                        None => return Ok(()),
                    };

                    if self.remove(&english, &polish)? {
                        writeln!(output, "Removed {} => {}", english, polish)?;
                    } else {
                        writeln!(output, "{} => {} is not in the dictionary", english, polish)?;
                    }
                },

                "4" => {
                    self.reload()?;
                    writeln!(output, "Loaded {} words", self.dictionary.len())?;
                },

                "5" | "q" => return Ok(()),

                other => {
                    log::debug!("unknown menu option {:?}", other);
                    writeln!(output, "Unknown option {:?}", other)?;
                },
            }
        }
    }
}

/// Prints `message` and reads one trimmed line, `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Option<String>> {
    writeln!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

fn prompt_pair<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<(String, String)>> {
    let english = match prompt(input, output, "English word:")? {
        Some(english) => english,
        None => return Ok(None),
    };
    let polish = match prompt(input, output, "Polish translation:")? {
        Some(polish) => polish,
        None => return Ok(None),
    };

    Ok(Some((english, polish)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::io::Cursor;

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut output = Vec::new();
        session.run(Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_find_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("File.dat");
        let mut session = Session::open(&path).unwrap();
        assert!(session.dictionary().is_empty());
        assert_eq!(session.data_file(), path.as_path());

        let output = run_script(&mut session, "2\ncat\nkot\n2\ncat\nkotek\n1\ncat\n5\n");
        assert!(output.contains("Added cat => kot"));
        assert!(output.contains("Added cat => kotek"));
        assert!(output.contains("kot\nkotek\n"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "cat\nkot\ncat\nkotek\n");

        let output = run_script(&mut session, "3\ncat\nkot\n1\ncat\nq\n");
        assert!(output.contains("Removed cat => kot"));
        assert_eq!(session.find("cat"), &["kotek"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "cat\nkotek\n");
    }

    #[test]
    fn duplicates_and_unknowns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("File.dat");
        let mut session = Session::open(&path).unwrap();

        let output = run_script(&mut session, "2\ndog\npies\n2\ndog\npies\n3\ncat\nkot\n1\ncat\n7\n");
        assert!(output.contains("dog => pies is already known"));
        assert!(output.contains("cat => kot is not in the dictionary"));
        assert!(output.contains("No translations of \"cat\""));
        assert!(output.contains("Unknown option \"7\""));

        // Duplicate was not appended a second time
        assert_eq!(fs::read_to_string(&path).unwrap(), "dog\npies\n");
    }

    #[test]
    fn invalid_word_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("File.dat");
        let mut session = Session::open(&path).unwrap();

        // Whitespace-only input trims down to an empty word
        let output = run_script(&mut session, "2\n   \nkot\n5\n");
        assert!(output.contains("invalid word"));
        assert!(session.dictionary().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn reload_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("File.dat");
        fs::write(&path, "cat\nkot\n").unwrap();

        let mut session = Session::open(&path).unwrap();
        assert_eq!(session.dictionary().len(), 1);

        // Reloading twice must not double anything
        let output = run_script(&mut session, "4\n4\n5\n");
        assert!(output.contains("Loaded 1 words"));
        assert_eq!(session.find("cat"), &["kot"]);

        // Picks up changes made to the file by someone else
        fs::write(&path, "dog\npies\n").unwrap();
        session.reload().unwrap();
        assert!(session.find("cat").is_empty());
        assert_eq!(session.find("dog"), &["pies"]);
    }

    #[test]
    fn failed_write_keeps_memory_in_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("File.dat");
        fs::write(&path, "dog\npies\n").unwrap();
        let mut session = Session::open(&path).unwrap();

        // A directory in place of the data file makes every write fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(session.add("cat", "kot"), Err(Error::Io(_))));
        assert!(session.find("cat").is_empty());

        assert!(matches!(session.remove("dog", "pies"), Err(Error::Io(_))));
        assert_eq!(session.find("dog"), &["pies"]);

        // Neither a duplicate nor an unknown pair needs the file
        assert_eq!(session.add("dog", "pies").unwrap(), false);
        assert_eq!(session.remove("cat", "kot").unwrap(), false);

        // Once the file is writable again, memory and file agree
        fs::remove_dir(&path).unwrap();
        assert!(session.add("cat", "kot").unwrap());
        session.reload().unwrap();
        assert_eq!(session.find("cat"), &["kot"]);
        assert!(session.find("dog").is_empty());
    }

    #[test]
    fn end_of_input_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path().join("File.dat")).unwrap();

        run_script(&mut session, "");
        run_script(&mut session, "2\ncat\n");
        assert!(session.dictionary().is_empty());
    }
}
