/*!
 * Resumable word supply for deck generation.
 *
 * Reads the input vocabulary list, scans any existing deck file for cards
 * that were already generated on a previous run, and hands back the
 * remaining words in shuffled order together with the open mode the deck
 * file should be opened with.
 */

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::file_utils::sanitize_filename;

/// Audio marker as it appears in a finished card line, e.g. `[sound:Haus.mp3]`
static SOUND_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[sound:(.*?)\.mp3\]").unwrap()
});

/// Image marker as it appears in a finished card line, e.g. `<img src="Haus.png">`
static IMAGE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img src="(.*?)\.png">"#).unwrap()
});

/// How the deck file should be opened for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Start a fresh deck, truncating anything already there
    Write,
    /// Continue an interrupted run, keeping existing cards
    Append,
}

impl FileMode {
    /// True when the run continues an existing deck
    pub fn is_append(self) -> bool {
        matches!(self, FileMode::Append)
    }
}

/// Supplies the words that still need cards, in shuffled order.
///
/// A word counts as done when the existing deck contains a media marker
/// whose base name equals the word itself or its sanitized filename form.
pub struct WordProvider {
    words: Vec<String>,
    file_mode: FileMode,
}

impl WordProvider {
    /// Load the word list and filter out already generated cards,
    /// shuffling the remainder with a thread-local RNG.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Self> {
        Self::load_seeded(input, output, None)
    }

    /// Same as [`WordProvider::load`] but with an optional shuffle seed for
    /// reproducible ordering.
    pub fn load_seeded<P: AsRef<Path>, Q: AsRef<Path>>(
        input: P,
        output: Q,
        seed: Option<u64>,
    ) -> Result<Self> {
        let input = input.as_ref();
        let output = output.as_ref();

        let mut all_words = read_word_list(input)?;
        if all_words.is_empty() {
            bail!("Word list {} contains no words", input.display());
        }
        info!("Read {} words from {}", all_words.len(), input.display());

        // The full list is shuffled before the resume filter runs, so a
        // resumed run does not replay the previous processing order.
        match seed {
            Some(seed) => all_words.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => all_words.shuffle(&mut rand::rng()),
        }

        let processed = scan_processed(output);
        let (words, file_mode) = if processed.is_empty() {
            (all_words, FileMode::Write)
        } else {
            let remaining: Vec<String> = all_words
                .into_iter()
                .filter(|word| {
                    !processed.contains(word.as_str())
                        && !processed.contains(sanitize_filename(word).as_str())
                })
                .collect();
            info!(
                "Found {} generated cards in {}, {} words remaining",
                processed.len(),
                output.display(),
                remaining.len()
            );
            (remaining, FileMode::Append)
        };
        debug!("Opening deck in {:?} mode with {} words queued", file_mode, words.len());

        Ok(WordProvider { words, file_mode })
    }

    /// Number of words still to process
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when every word already has a card
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Open mode the deck file must be opened with for this run
    pub fn file_mode(&self) -> FileMode {
        self.file_mode
    }

    /// Words still to process, in processing order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Consume the provider, yielding the words in processing order
    pub fn into_words(self) -> std::vec::IntoIter<String> {
        self.words.into_iter()
    }
}

/// Read the input list: one word per line, trimmed, blank lines skipped.
fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Collect the media base names of every card already present in the deck.
///
/// Each line is identified by its audio marker when present, falling back
/// to the image marker. A missing or unreadable deck file is not an error,
/// it simply means a fresh start.
fn scan_processed(path: &Path) -> HashSet<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No deck file at {}, starting fresh", path.display());
            return HashSet::new();
        }
        Err(e) => {
            warn!("Could not read deck file {}: {}. Starting fresh", path.display(), e);
            return HashSet::new();
        }
    };

    let mut processed = HashSet::new();
    for line in content.lines() {
        if let Some(caps) = SOUND_MARKER.captures(line) {
            processed.insert(caps[1].to_string());
        } else if let Some(caps) = IMAGE_MARKER.captures(line) {
            processed.insert(caps[1].to_string());
        }
    }
    processed
}
