//! Per-entry expiration settings.

use std::time::Duration;

/// Absolute expiration applied when a caller gives none.
pub const DEFAULT_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(60);

/// Absolute expiration for product read entries.
pub const PRODUCT_TTL: Duration = Duration::from_secs(300);

/// Expiration policy for a single cache entry.
///
/// The absolute and sliding expirations are independent: an entry is gone
/// once either elapses. Every hit re-arms the sliding window, but never past
/// the absolute deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    /// Lifetime from the moment of writing.
    pub absolute_expiration: Option<Duration>,
    /// Idle timeout, re-armed on every hit.
    pub sliding_expiration: Option<Duration>,
}

impl CacheEntryOptions {
    /// Options with only an absolute expiration.
    #[must_use]
    pub const fn absolute(ttl: Duration) -> Self {
        Self {
            absolute_expiration: Some(ttl),
            sliding_expiration: None,
        }
    }

    /// Adds a sliding expiration.
    #[must_use]
    pub const fn with_sliding(mut self, idle: Duration) -> Self {
        self.sliding_expiration = Some(idle);
        self
    }

    /// Fills in a missing absolute expiration with the store's default.
    #[must_use]
    pub const fn or_default_ttl(mut self, default_ttl: Duration) -> Self {
        if self.absolute_expiration.is_none() {
            self.absolute_expiration = Some(default_ttl);
        }
        self
    }

    /// The absolute lifetime, falling back to [`DEFAULT_ABSOLUTE_EXPIRATION`].
    #[must_use]
    pub fn absolute_or_default(&self) -> Duration {
        self.absolute_expiration.unwrap_or(DEFAULT_ABSOLUTE_EXPIRATION)
    }

    /// Time until the entry lapses if it is never read again.
    #[must_use]
    pub fn initial_ttl(&self) -> Duration {
        let absolute = self.absolute_or_default();
        self.sliding_expiration
            .map_or(absolute, |sliding| sliding.min(absolute))
    }
}
