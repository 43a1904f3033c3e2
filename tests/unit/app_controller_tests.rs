/*!
 * Tests for run statistics and the controller preflight
 */

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ankiwort::app_controller::{Controller, RunStats};
use crate::common;
use crate::common::mock_chat::MockChatClient;

/// Test that an empty run counts as fully successful
#[test]
fn test_success_rate_withEmptyRun_shouldBeClean() {
    let stats = RunStats::default();
    assert_eq!(stats.success_rate(), 100.0);
}

/// Test that the success rate is the share of succeeded words
#[test]
fn test_success_rate_withPartialFailures_shouldComputeShare() {
    let stats = RunStats {
        total_words: 4,
        succeeded: 3,
        failed: 1,
        ..RunStats::default()
    };
    assert_eq!(stats.success_rate(), 75.0);
}

/// Test that the summary lists counts, duration and failed words
#[test]
fn test_summary_withFailedWords_shouldListThem() {
    let stats = RunStats {
        total_words: 2,
        succeeded: 1,
        failed: 1,
        failed_words: vec!["Haus".to_string()],
        elapsed: Duration::from_secs(65),
        ..RunStats::default()
    };

    let summary = stats.summary();

    assert!(summary.contains("Processed 1/2 words"));
    assert!(summary.contains("1m 5s"));
    assert!(summary.contains("(50% success)"));
    assert!(summary.contains("Failed words: Haus"));
}

/// Test that a clean summary stays a single line
#[test]
fn test_summary_withoutFailures_shouldBeSingleLine() {
    let stats = RunStats {
        total_words: 3,
        succeeded: 3,
        elapsed: Duration::from_millis(2500),
        ..RunStats::default()
    };

    let summary = stats.summary();

    assert!(summary.contains("Processed 3/3 words"));
    assert!(summary.contains("2.500s"));
    assert!(summary.contains("(100% success)"));
    assert!(!summary.contains('\n'));
    assert!(!summary.contains("Failed words"));
}

/// Test that preflight accepts a valid setup without calling any service
#[test]
fn test_preflight_withValidSetup_shouldPass() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());
    common::create_word_list(&temp_dir.path().to_path_buf(), "input_words.txt", &["Haus", "Baum"])?;

    let controller = Controller::with_chat_client(
        config,
        Arc::new(MockChatClient::always(common::sample_noun_reply())),
    )?;

    controller.preflight()?;
    Ok(())
}

/// Test that preflight reports a missing word list
#[test]
fn test_preflight_withMissingInputFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(temp_dir.path());

    let controller = Controller::with_chat_client(
        config,
        Arc::new(MockChatClient::always(common::sample_noun_reply())),
    )?;

    assert!(controller.preflight().is_err());
    Ok(())
}

/// Test that controller construction rejects an unresolvable target language
#[test]
fn test_with_chat_client_withBadTargetLanguage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(temp_dir.path());
    config.target_language = "notalanguage".to_string();

    let result = Controller::with_chat_client(
        config,
        Arc::new(MockChatClient::always("x")),
    );

    assert!(result.is_err());
    Ok(())
}
