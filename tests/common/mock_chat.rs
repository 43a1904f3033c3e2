/*!
 * Mock chat client for testing
 *
 * Implements the ChatClient trait with scripted replies so the card
 * pipeline can run without any external API calls. Calls are recorded in
 * a tracker the test can inspect afterwards.
 */

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ankiwort::errors::ProviderError;
use ankiwort::providers::{ChatClient, ChatOutcome, TokenUsage};

/// Tracks chat calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct ChatCallTracker {
    /// Count of mock chat calls made
    pub call_count: usize,
    /// System prompt of the last call
    pub last_system_prompt: Option<String>,
    /// User prompt of the last call
    pub last_user_prompt: Option<String>,
    /// Completion budget of every call, in order
    pub max_tokens_seen: Vec<u32>,
}

/// One scripted outcome for the mock chat client
pub enum ScriptedReply {
    /// Answer with this text
    Text(String),
    /// Fail with this error
    Fail(ProviderError),
}

/// Chat client that works through a scripted queue of replies.
///
/// Once the queue is empty the fallback reply is used; without one the
/// call fails, which catches tests making more calls than they meant to.
pub struct MockChatClient {
    script: Mutex<VecDeque<ScriptedReply>>,
    fallback: Option<String>,
    tracker: Arc<Mutex<ChatCallTracker>>,
}

impl MockChatClient {
    /// Create a mock that always answers with the same reply
    pub fn always(reply: impl Into<String>) -> Self {
        MockChatClient {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(reply.into()),
            tracker: Arc::new(Mutex::new(ChatCallTracker::default())),
        }
    }

    /// Create a mock that works through the given replies in order and
    /// fails once they run out
    pub fn scripted(replies: Vec<ScriptedReply>) -> Self {
        MockChatClient {
            script: Mutex::new(VecDeque::from(replies)),
            fallback: None,
            tracker: Arc::new(Mutex::new(ChatCallTracker::default())),
        }
    }

    /// Create a mock that works through the given replies, then answers
    /// every further call with the fallback reply
    pub fn scripted_then(replies: Vec<ScriptedReply>, fallback: impl Into<String>) -> Self {
        MockChatClient {
            script: Mutex::new(VecDeque::from(replies)),
            fallback: Some(fallback.into()),
            tracker: Arc::new(Mutex::new(ChatCallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<ChatCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<ChatOutcome, ProviderError> {
        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.last_system_prompt = Some(system_prompt.to_string());
            tracker.last_user_prompt = Some(user_prompt.to_string());
            tracker.max_tokens_seen.push(max_tokens);
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Text(text)) => Ok(ChatOutcome {
                text,
                usage: mock_usage(),
            }),
            Some(ScriptedReply::Fail(error)) => Err(error),
            None => match &self.fallback {
                Some(text) => Ok(ChatOutcome {
                    text: text.clone(),
                    usage: mock_usage(),
                }),
                None => Err(ProviderError::RequestFailed(
                    "mock script exhausted".to_string(),
                )),
            },
        }
    }
}

/// Fixed usage numbers so token accounting is observable in tests
fn mock_usage() -> TokenUsage {
    TokenUsage {
        prompt_tokens: 100,
        completion_tokens: 50,
        total_tokens: 150,
    }
}
