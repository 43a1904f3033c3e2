/*!
 * Common test utilities for the ankiwort test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use ankiwort::app_config::{Config, Credentials};

// Re-export the mock chat client module
pub mod mock_chat;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a word list file with one word per line
pub fn create_word_list(dir: &PathBuf, filename: &str, words: &[&str]) -> Result<PathBuf> {
    let content = words.join("\n") + "\n";
    create_test_file(dir, filename, &content)
}

/// Builds a config with every path inside the given directory and all media
/// generation turned off, so a run touches nothing outside the temp dir and
/// makes no network calls.
pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.input_file = dir.join("input_words.txt");
    config.output_file = dir.join("anki.txt");
    config.audio_output_dir = dir.join("audio");
    config.image_output_dir = dir.join("images");
    config.anki_media_dir = None;
    config.generate_audio = false;
    config.generate_images = false;
    config.shuffle_seed = Some(42);
    config.credentials = Credentials {
        groq_api_key: "test-key".to_string(),
        cloudflare_account_id: None,
        cloudflare_api_token: None,
    };
    config
}

/// A well formed model reply for a noun, in the labelled format the card
/// parser expects
pub fn sample_noun_reply() -> String {
    [
        "Word type: noun",
        "Gender: neuter",
        "Plural form: Häuser",
        "Word translation: house, building",
        "German sentence: Das Haus ist alt.",
        "English translation: The house is old.",
        "Related words: Wohnung (apartment), Gebäude (building)",
        "Additional info: One of the most common German nouns",
    ]
    .join("\n")
}
