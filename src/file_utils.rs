use anyhow::{Context, Result, anyhow};
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::word_provider::FileMode;

// @module: File and directory utilities

/// Build a filesystem and Anki safe media name from a word.
///
/// Keeps ASCII alphanumerics and the German letters `äöüÄÖÜß`; every other
/// character becomes an underscore. Applying the function to its own output
/// changes nothing, so marker names scanned back from a deck stay stable.
pub fn sanitize_filename(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "äöüÄÖÜß".contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating the parent directory if needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        Self::ensure_parent_dir(path.as_ref())?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Write raw bytes to a file, creating the parent directory if needed
    pub fn write_bytes<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
        Self::ensure_parent_dir(path.as_ref())?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Copy a file into a directory, keeping its name. Returns the target path.
    pub fn copy_into_dir<P1: AsRef<Path>, P2: AsRef<Path>>(file: P1, dir: P2) -> Result<PathBuf> {
        let file = file.as_ref();
        let dir = dir.as_ref();

        let name = file
            .file_name()
            .ok_or_else(|| anyhow!("Source has no file name: {:?}", file))?;
        Self::ensure_dir(dir)?;

        let target = dir.join(name);
        fs::copy(file, &target)
            .with_context(|| format!("Failed to copy {:?} into {:?}", file, dir))?;
        Ok(target)
    }

    fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }
        Ok(())
    }
}

/// Line-oriented writer for the deck file.
///
/// Every card is flushed as soon as it is written so that an interrupted
/// run leaves a deck the next run can resume from.
pub struct DeckWriter {
    file: fs::File,
    path: PathBuf,
}

impl DeckWriter {
    // @creates: Deck file opened fresh or for appending, parents included
    pub fn open<P: AsRef<Path>>(path: P, mode: FileMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        FileManager::ensure_parent_dir(&path)?;

        let file = match mode {
            FileMode::Write => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path),
            FileMode::Append => OpenOptions::new().append(true).create(true).open(&path),
        }
        .with_context(|| format!("Failed to open deck file {}", path.display()))?;

        Ok(DeckWriter { file, path })
    }

    /// Append one finished card line and flush it to disk
    pub fn append_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{}", line)
            .with_context(|| format!("Failed to write card to {}", self.path.display()))?;
        self.file
            .flush()
            .with_context(|| format!("Failed to flush deck file {}", self.path.display()))?;
        Ok(())
    }

    /// Path of the deck file being written
    pub fn path(&self) -> &Path {
        &self.path
    }
}
