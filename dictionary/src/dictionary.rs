use llrb::OrderedMap;

use crate::error::Result;

/// An English word together with every Polish translation known for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    english: String,
    translations: Vec<String>,
}

impl Entry {
    fn new(english: &str, polish: &str) -> Self {
        Self {
            english: english.to_string(),
            translations: vec![polish.to_string()],
        }
    }

    /// The English word this entry is stored under
    pub fn english(&self) -> &str {
        &self.english
    }

    /// Translations in the order they were added. Never empty.
    pub fn translations(&self) -> &[String] {
        &self.translations
    }
}

/// English to Polish dictionary, keyed and ordered by the English word
///
/// Each word keeps a list of distinct translations. Adding a second translation for a word that is
/// already present extends its list instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: OrderedMap<String, Entry>,
}

impl Dictionary {
    /// Creates an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct English words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Records `polish` as a translation of `english`
    ///
    /// Returns `false` if exactly this pair was already known, in which case nothing changes.
    ///
    /// ```rust
    /// use dictionary::Dictionary;
    ///
    /// let mut dictionary = Dictionary::new();
    /// assert!(dictionary.add_translation("cat", "kot"));
    /// assert!(dictionary.add_translation("cat", "kotek"));
    /// assert!(!dictionary.add_translation("cat", "kot"));
    /// assert_eq!(dictionary.translations("cat"), &["kot", "kotek"]);
    /// ```
    pub fn add_translation(&mut self, english: &str, polish: &str) -> bool {
        match self.words.get_mut(english) {
            Some(entry) => {
                if entry.translations.iter().any(|known| known == polish) {
                    log::debug!("{:?} is already a translation of {:?}", polish, english);
                    return false;
                }
                entry.translations.push(polish.to_string());
            },
            None => {
                self.words.insert(english.to_string(), Entry::new(english, polish));
            },
        }

        true
    }

    /// Forgets `polish` as a translation of `english`
    ///
    /// The word itself is removed once its last translation goes. Returns `false` if the pair was
    /// not known.
    pub fn remove_translation(&mut self, english: &str, polish: &str) -> Result<bool> {
        let entry = match self.words.get_mut(english) {
            Some(entry) => entry,
            None => {
                log::debug!("cannot remove a translation of unknown word {:?}", english);
                return Ok(false);
            },
        };

        let index = match entry.translations.iter().position(|known| known == polish) {
            Some(index) => index,
            None => return Ok(false),
        };
        entry.translations.remove(index);

        if entry.translations.is_empty() {
            self.words.remove(english)?;
            log::debug!("removed {:?} along with its last translation", english);
        }

        Ok(true)
    }

    /// All translations of `english`, empty if the word is unknown
    pub fn translations(&self, english: &str) -> &[String] {
        match self.words.try_get(english) {
            Ok(entry) => &entry.translations,
            Err(err) => {
                log::debug!("no translations for {:?}: {}", english, err);
                &[]
            },
        }
    }

    /// The entry stored for `english`, if any
    pub fn entry(&self, english: &str) -> Option<&Entry> {
        self.words.get(english)
    }

    /// English words in ascending order
    pub fn english_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.keys().map(String::as_str)
    }

    /// Every Polish translation, grouped by English word in ascending order
    pub fn polish_translations(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.values()
            .flat_map(|entry| entry.translations.iter().map(String::as_str))
    }

    /// Every `(english, polish)` pair, in the order they are written to the data file
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.words.values().flat_map(|entry| {
            entry.translations.iter()
                .map(move |polish| (entry.english.as_str(), polish.as_str()))
        })
    }

    /// Iterates over the entries in ascending order of their English word
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.words.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        let mut dictionary = Dictionary::new();
        for &(english, polish) in &[
            ("dog", "pies"),
            ("cat", "kot"),
            ("house", "dom"),
            ("cat", "kotek"),
            ("apple", "jablko"),
        ] {
            assert!(dictionary.add_translation(english, polish));
        }
        dictionary
    }

    #[test]
    fn add_merges_translations() {
        let dictionary = sample();
        assert_eq!(dictionary.len(), 4);
        assert_eq!(dictionary.translations("cat"), &["kot", "kotek"]);
        assert_eq!(dictionary.translations("dog"), &["pies"]);

        let entry = dictionary.entry("cat").unwrap();
        assert_eq!(entry.english(), "cat");
        assert_eq!(entry.translations().len(), 2);
    }

    #[test]
    fn duplicate_pair_is_ignored() {
        let mut dictionary = sample();
        let before = dictionary.clone();

        assert!(!dictionary.add_translation("cat", "kot"));
        assert_eq!(dictionary, before);
    }

    #[test]
    fn unknown_word_has_no_translations() {
        let dictionary = sample();
        assert!(dictionary.translations("zebra").is_empty());
        assert!(dictionary.entry("zebra").is_none());
        assert!(Dictionary::new().translations("cat").is_empty());
    }

    #[test]
    fn ordered_listings() {
        let dictionary = sample();

        let words: Vec<_> = dictionary.english_words().collect();
        assert_eq!(words, &["apple", "cat", "dog", "house"]);

        let polish: Vec<_> = dictionary.polish_translations().collect();
        assert_eq!(polish, &["jablko", "kot", "kotek", "pies", "dom"]);

        let pairs: Vec<_> = dictionary.pairs().collect();
        assert_eq!(pairs, &[
            ("apple", "jablko"),
            ("cat", "kot"),
            ("cat", "kotek"),
            ("dog", "pies"),
            ("house", "dom"),
        ]);

        let entries: Vec<_> = dictionary.entries().map(Entry::english).collect();
        assert_eq!(entries, words);
    }

    #[test]
    fn remove_translation() {
        let mut dictionary = sample();

        assert_eq!(dictionary.remove_translation("cat", "kot").unwrap(), true);
        assert_eq!(dictionary.translations("cat"), &["kotek"]);
        assert_eq!(dictionary.len(), 4);

        // Last translation takes the word with it
        assert_eq!(dictionary.remove_translation("cat", "kotek").unwrap(), true);
        assert!(dictionary.entry("cat").is_none());
        assert_eq!(dictionary.len(), 3);

        assert_eq!(dictionary.remove_translation("cat", "kotek").unwrap(), false);
        assert_eq!(dictionary.remove_translation("dog", "kot").unwrap(), false);
        assert_eq!(dictionary.translations("dog"), &["pies"]);
    }

    #[test]
    fn remove_everything() {
        let mut dictionary = sample();
        let pairs: Vec<(String, String)> = dictionary.pairs()
            .map(|(english, polish)| (english.to_string(), polish.to_string()))
            .collect();

        for (english, polish) in &pairs {
            assert!(dictionary.remove_translation(english, polish).unwrap());
        }
        assert!(dictionary.is_empty());
        assert_eq!(dictionary, Dictionary::new());

        assert_eq!(dictionary.remove_translation("cat", "kot").unwrap(), false);
    }
}
