/*!
 * Client-side request pacing for the generation APIs.
 *
 * Implements a token bucket with lazy refill: tokens accumulate as a
 * function of elapsed time and are only recomputed when the bucket is
 * consulted. There is no background task topping the bucket up.
 */

use std::time::Duration;

use log::debug;
use tokio::time::Instant;

/// Token bucket rate limiter.
///
/// The bucket starts full. Every request costs a whole number of tokens;
/// fractional token balances arise from refill only. Time is read from the
/// tokio clock so that tests can drive it deterministically.
pub struct TokenBucket {
    /// Maximum number of tokens the bucket can hold
    capacity: f64,
    /// Current token balance
    tokens: f64,
    /// Tokens regained per second
    refill_rate: f64,
    /// Instant of the last refill computation
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a bucket with the given capacity and refill rate, starting full.
    ///
    /// The refill rate must be positive, otherwise a blocking consume could
    /// wait forever.
    pub fn new(capacity: u32, refill_rate: f64) -> Self {
        assert!(refill_rate > 0.0, "refill rate must be positive");
        TokenBucket {
            capacity: f64::from(capacity),
            tokens: f64::from(capacity),
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    /// Take `tokens` tokens out of the bucket.
    ///
    /// In blocking mode this always succeeds: if the balance is short, the
    /// call sleeps exactly long enough for the refill to cover the deficit
    /// and then consumes. In non-blocking mode it returns false and leaves
    /// the balance untouched when not enough tokens are available.
    pub async fn consume(&mut self, tokens: u32, block: bool) -> bool {
        let requested = f64::from(tokens);
        self.refill();

        if requested <= self.tokens {
            self.tokens -= requested;
            return true;
        }

        if !block {
            return false;
        }

        let wait = (requested - self.tokens) / self.refill_rate;
        debug!("Rate limiter pausing for {:.2}s ({} tokens requested, {:.2} available)",
            wait, tokens, self.tokens);
        tokio::time::sleep(Duration::from_secs_f64(wait)).await;

        self.refill();
        // A request larger than the capacity can still leave the refilled
        // balance short. The wait already covered the full deficit, so the
        // balance floors at zero rather than going negative.
        self.tokens = (self.tokens - requested).max(0.0);
        true
    }

    /// Current balance after refilling. Mainly useful for diagnostics.
    pub fn available(&mut self) -> f64 {
        self.refill();
        self.tokens
    }

    /// Maximum balance the bucket can reach.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Credit the bucket with the tokens earned since the last refill,
    /// capped at capacity.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
            self.last_refill = now;
        }
    }
}
