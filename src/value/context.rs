//! Fetch context
//!
//! Carries a deadline and a cancellation token down to the `ValueFetcher`.
//! The lazy value layer never inspects it; capabilities that do I/O call
//! `check()` before and between reads.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{AtlasError, Result};

/// Execution context for a single fetch
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl FetchContext {
    /// A context with no deadline that can never be cancelled
    pub fn background() -> Self {
        Self::default()
    }

    /// Build a context with the configured fetch timeout, if any
    pub fn from_config(config: &Config) -> Self {
        match config.fetch_timeout_ms {
            Some(ms) => Self::background().with_timeout(Duration::from_millis(ms)),
            None => Self::background(),
        }
    }

    /// Bound the context by `deadline`. An earlier existing deadline wins.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Bound the context to `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Make the context cancellable, returning the handle that cancels it
    ///
    /// Clones of the returned context share the same token. If the context
    /// was already cancellable, the new token is a child: cancelling the
    /// parent still cancels this context, but not the other way round.
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let token = match &self.cancel {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        self.cancel = Some(token.clone());
        (self, CancelHandle { token })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` if there is no deadline
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, CancellationToken::is_cancelled)
    }

    /// Fail with `Cancelled` or `DeadlineExceeded` if the fetch should stop
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(AtlasError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(AtlasError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

/// Cancels every context sharing its token, and every context derived from them
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
