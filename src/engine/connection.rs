//! Engine Connection Management
//!
//! Owns the single reusable engine handle. A cached handle is reused while it
//! answers the liveness check; otherwise a new one is built under a
//! `RetryPolicy`. Exhausting the policy fails the current request only, the
//! next call starts the whole sequence again.

use super::client::{Connector, EngineClient};
use crate::error::ShimError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No acquisition has succeeded yet.
    Uninitialized,
    Connected,
    /// The last liveness check or acquisition failed.
    Disconnected,
}

/// How long to wait between connection attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum DelayStrategy {
    Fixed(Duration),
    /// Doubles from `initial` up to `max`, plus up to `jitter` of random noise.
    Exponential {
        initial: Duration,
        max: Duration,
        jitter: Duration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: DelayStrategy,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay: DelayStrategy::Fixed(delay),
        }
    }

    /// Delay to wait after the failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match &self.delay {
            DelayStrategy::Fixed(delay) => *delay,
            DelayStrategy::Exponential {
                initial,
                max,
                jitter,
            } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                let base = initial.saturating_mul(factor).min(*max);
                let jitter_ms = jitter.as_millis() as u64;
                if jitter_ms == 0 {
                    base
                } else {
                    base + Duration::from_millis(rand::random::<u64>() % (jitter_ms + 1))
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(5, Duration::from_secs(5))
    }
}

struct Slot {
    client: Option<Arc<dyn EngineClient>>,
    state: ConnectionState,
}

pub struct ConnectionManager {
    connector: Arc<dyn Connector>,
    policy: RetryPolicy,
    slot: RwLock<Slot>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn Connector>, policy: RetryPolicy) -> Self {
        Self {
            connector,
            policy,
            slot: RwLock::new(Slot {
                client: None,
                state: ConnectionState::Uninitialized,
            }),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn state(&self) -> ConnectionState {
        self.slot.read().await.state
    }

    /// Returns a live engine handle, reconnecting if needed.
    ///
    /// # Returns
    /// * `Ok(client)` - the cached handle if it still answers a ping, or a new one.
    /// * `Err(ShimError::ServiceUnavailable)` - every attempt of the policy failed.
    pub async fn acquire(&self) -> Result<Arc<dyn EngineClient>, ShimError> {
        let cached = self.slot.read().await.client.clone();

        if let Some(client) = cached {
            if client.ping().await {
                return Ok(client);
            }
            tracing::warn!("Cached engine connection failed liveness check, reconnecting");
            self.mark_disconnected().await;
        }

        self.reconnect().await
    }

    async fn mark_disconnected(&self) {
        let mut slot = self.slot.write().await;
        slot.client = None;
        slot.state = ConnectionState::Disconnected;
    }

    /// Records a failed acquisition. A handle cached meanwhile by a concurrent
    /// caller is left in place.
    async fn mark_exhausted(&self) {
        let mut slot = self.slot.write().await;
        if slot.client.is_none() {
            slot.state = ConnectionState::Disconnected;
        }
    }

    async fn reconnect(&self) -> Result<Arc<dyn EngineClient>, ShimError> {
        let attempts = self.policy.max_attempts.max(1);
        tracing::info!(
            "Attempting to connect to search engine at {}...",
            self.connector.address()
        );

        for attempt in 1..=attempts {
            match self.connector.connect() {
                Ok(client) => {
                    if client.ping().await {
                        tracing::info!("Successfully connected to search engine.");
                        let mut slot = self.slot.write().await;
                        slot.client = Some(client.clone());
                        slot.state = ConnectionState::Connected;
                        return Ok(client);
                    }
                    tracing::warn!("Ping failed. Retrying ({}/{})...", attempt, attempts);
                }
                Err(e) => {
                    tracing::warn!(
                        "Connection error: {}. Retrying ({}/{})...",
                        e,
                        attempt,
                        attempts
                    );
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.policy.delay_after(attempt)).await;
            }
        }

        tracing::error!(
            "Could not connect to search engine at {} after {} attempts",
            self.connector.address(),
            attempts
        );
        self.mark_exhausted().await;

        Err(ShimError::ServiceUnavailable { attempts })
    }
}
