//! Session cache and acquisition orchestration.

use std::time::Duration;

use glide_common::resilience::PollConfig;
use glide_domain::{GlideError, Result, Session};
use tokio::sync::Mutex;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::context::OAuthContext;
use super::strategy::SessionStrategy;

/// Per-client session cache backed by one acquisition strategy.
///
/// The cache lock is held across acquisition, so concurrent callers that
/// miss the cache wait for a single token exchange instead of racing.
pub struct SessionManager<S> {
    ctx: OAuthContext,
    strategy: S,
    cached: Mutex<Option<Session>>,
}

impl<S: SessionStrategy> SessionManager<S> {
    pub fn new(ctx: OAuthContext, strategy: S) -> Self {
        Self { ctx, strategy, cached: Mutex::new(None) }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn context(&self) -> &OAuthContext {
        &self.ctx
    }

    /// Return a session usable for this manager's scope.
    ///
    /// Resolution order:
    /// 1. `explicit`, returned verbatim and never cached
    /// 2. the cached session, if it carries the scope and is not about to
    ///    expire
    /// 3. a freshly acquired session, which replaces the cache
    ///
    /// # Errors
    /// Propagates strategy failures unchanged.
    #[instrument(skip_all, fields(scope = self.ctx.scope()))]
    pub async fn get_session(&self, explicit: Option<&Session>) -> Result<Session> {
        if let Some(session) = explicit {
            debug!("using caller-provided session");
            return Ok(session.clone());
        }

        let mut cached = self.cached.lock().await;
        if let Some(session) = cached.as_ref() {
            if session.is_valid(self.ctx.scope(), self.ctx.clock().now()) {
                debug!("using cached session");
                return Ok(session.clone());
            }
        }

        debug!("generating new session");
        let session = self.strategy.acquire(&self.ctx).await?;
        *cached = Some(session.clone());
        Ok(session)
    }

    /// Acquire a new session unconditionally and cache it.
    ///
    /// # Errors
    /// Propagates strategy failures unchanged; the cache is left untouched.
    pub async fn generate_new_session(&self) -> Result<Session> {
        let mut cached = self.cached.lock().await;
        let session = self.strategy.acquire(&self.ctx).await?;
        *cached = Some(session.clone());
        Ok(session)
    }

    /// Currently cached session, valid or not.
    pub async fn cached_session(&self) -> Option<Session> {
        self.cached.lock().await.clone()
    }

    pub async fn clear(&self) {
        *self.cached.lock().await = None;
    }

    /// Retry [`get_session`](Self::get_session) until it succeeds.
    ///
    /// Used while the end user completes consent out of band. Retries back
    /// off per `config`; errors that cannot resolve themselves (missing
    /// credentials or configuration) are returned immediately.
    ///
    /// # Errors
    /// - `GlideError::Timeout` once `config.timeout` elapses
    /// - `GlideError::PollExhausted` once `config.max_attempts` is reached
    /// - `GlideError::Cancelled` when `cancel` fires
    /// - any non-retryable session error
    #[instrument(skip_all, fields(scope = self.ctx.scope()))]
    pub async fn poll_and_wait_for_session(
        &self,
        config: &PollConfig,
        cancel: &CancellationToken,
    ) -> Result<Session> {
        let now = Instant::now();
        let deadline = now.checked_add(config.timeout).unwrap_or_else(|| now + FAR_FUTURE);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(GlideError::Cancelled),
                () = sleep_until(deadline) => return Err(GlideError::Timeout(config.timeout)),
                outcome = self.get_session(None) => outcome,
            };

            let err = match outcome {
                Ok(session) => {
                    debug!(attempts, "session ready");
                    return Ok(session);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => err,
            };

            if config.attempts_exhausted(attempts) {
                return Err(GlideError::PollExhausted { attempts, last_error: Box::new(err) });
            }

            let delay: Duration = config.delay_after(attempts);
            debug!(attempts, ?delay, error = %err, "session not ready; waiting");

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(GlideError::Cancelled),
                () = sleep_until(deadline) => return Err(GlideError::Timeout(config.timeout)),
                () = sleep(delay) => {}
            }
        }
    }
}

/// Stand-in deadline when `timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

impl<S> std::fmt::Debug for SessionManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("ctx", &self.ctx).finish_non_exhaustive()
    }
}
