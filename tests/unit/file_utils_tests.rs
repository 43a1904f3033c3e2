/*!
 * Tests for file utilities and the deck writer
 */

use std::fs;
use anyhow::Result;
use ankiwort::file_utils::{DeckWriter, FileManager, sanitize_filename};
use ankiwort::word_provider::FileMode;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "exists.tmp", "content")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that file_exists returns false for directories
#[test]
fn test_file_exists_withDirectory_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists returns true for existing directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::dir_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("non_existent_dir"));
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAllLevels() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test that ensure_dir accepts a directory that already exists
#[test]
fn test_ensure_dir_withExistingDir_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    FileManager::ensure_dir(temp_dir.path())?;

    Ok(())
}

/// Test that read_to_string returns the file content
#[test]
fn test_read_to_string_withExistingFile_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "read.txt", "Haus\nBaum\n")?;

    let content = FileManager::read_to_string(&test_file)?;

    assert_eq!(content, "Haus\nBaum\n");
    Ok(())
}

/// Test that read_to_string fails for missing files
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let result = FileManager::read_to_string("definitely_not_here.txt");
    assert!(result.is_err());
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateParent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("sub").join("dir").join("out.txt");

    FileManager::write_to_file(&target, "hello")?;

    assert_eq!(FileManager::read_to_string(&target)?, "hello");
    Ok(())
}

/// Test that write_bytes round-trips binary data
#[test]
fn test_write_bytes_withBinaryData_shouldWriteExactBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("audio").join("word.mp3");
    let data: &[u8] = &[0x49, 0x44, 0x33, 0x00, 0xFF, 0xFB];

    FileManager::write_bytes(&target, data)?;

    assert_eq!(fs::read(&target)?, data);
    Ok(())
}

/// Test that copy_into_dir keeps the file name and creates the target dir
#[test]
fn test_copy_into_dir_withMissingTargetDir_shouldCreateAndCopy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(&temp_dir.path().to_path_buf(), "Haus.mp3", "fake audio")?;
    let media_dir = temp_dir.path().join("collection.media");

    let target = FileManager::copy_into_dir(&source, &media_dir)?;

    assert_eq!(target, media_dir.join("Haus.mp3"));
    assert_eq!(FileManager::read_to_string(&target)?, "fake audio");
    Ok(())
}

/// Test that sanitize_filename keeps German letters and replaces the rest
#[test]
fn test_sanitize_filename_withUmlauts_shouldKeepGermanLetters() {
    assert_eq!(sanitize_filename("Käse"), "Käse");
    assert_eq!(sanitize_filename("Straße"), "Straße");
    assert_eq!(sanitize_filename("Tür"), "Tür");
}

/// Test that sanitize_filename replaces spaces and punctuation with underscores
#[test]
fn test_sanitize_filename_withSpacesAndPunctuation_shouldUseUnderscores() {
    assert_eq!(sanitize_filename("Haus Tür"), "Haus_Tür");
    assert_eq!(sanitize_filename("was?!"), "was__");
    assert_eq!(sanitize_filename("  Haus  "), "Haus");
}

/// Test that sanitize_filename is idempotent
#[test]
fn test_sanitize_filename_withSanitizedInput_shouldChangeNothing() {
    for word in ["Haus", "Haus_Tür", "Käse", "zum_Beispiel"] {
        let once = sanitize_filename(word);
        assert_eq!(sanitize_filename(&once), once);
    }
}

/// Test that opening a deck in write mode truncates what was there
#[test]
fn test_deck_writer_withWriteMode_shouldTruncateExisting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deck = common::create_test_file(&temp_dir.path().to_path_buf(), "anki.txt", "old card\n")?;

    let mut writer = DeckWriter::open(&deck, FileMode::Write)?;
    writer.append_line("new card")?;

    assert_eq!(FileManager::read_to_string(&deck)?, "new card\n");
    Ok(())
}

/// Test that opening a deck in append mode keeps existing cards
#[test]
fn test_deck_writer_withAppendMode_shouldKeepExistingCards() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deck = common::create_test_file(&temp_dir.path().to_path_buf(), "anki.txt", "old card\n")?;

    let mut writer = DeckWriter::open(&deck, FileMode::Append)?;
    writer.append_line("new card")?;

    assert_eq!(FileManager::read_to_string(&deck)?, "old card\nnew card\n");
    Ok(())
}

/// Test that the deck writer creates missing parent directories
#[test]
fn test_deck_writer_withNestedOutputPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deck = temp_dir.path().join("anki_output").join("deck").join("anki.txt");

    let mut writer = DeckWriter::open(&deck, FileMode::Write)?;
    writer.append_line("first card")?;

    assert_eq!(writer.path(), deck.as_path());
    assert!(FileManager::file_exists(&deck));
    Ok(())
}

/// Test that append_line flushes each card to disk immediately
#[test]
fn test_append_line_withOpenWriter_shouldBeVisibleBeforeDrop() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let deck = temp_dir.path().join("anki.txt");

    let mut writer = DeckWriter::open(&deck, FileMode::Write)?;
    writer.append_line("card one")?;
    writer.append_line("card two")?;

    // Read while the writer is still alive, lines must already be on disk
    let content = FileManager::read_to_string(&deck)?;
    assert_eq!(content, "card one\ncard two\n");
    Ok(())
}
