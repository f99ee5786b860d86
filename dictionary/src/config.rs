//! Command line configuration for the dictionary binary

use std::path::PathBuf;

use clap::Parser;

/// Configuration for the interactive dictionary
#[derive(Parser, Debug, Clone)]
#[command(name = "dictionary", about = "English to Polish dictionary")]
pub struct Config {
    /// Data file of alternating lines: an English word, then one Polish translation
    #[arg(long, env = "DICTIONARY_DATA_FILE", default_value = "File.dat")]
    pub data_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_file() {
        let config = Config::try_parse_from(&["dictionary"]).unwrap();
        assert_eq!(config.data_file, PathBuf::from("File.dat"));

        let config = Config::try_parse_from(&["dictionary", "--data-file", "/tmp/words.dat"]).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/words.dat"));
    }
}
