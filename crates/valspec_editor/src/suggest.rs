//! Debounced, cancellable suggestion loading for string fields.
//!
//! Each [`SuggestionLoader::reload`] starts a fresh tokio task that waits for
//! the debounce delay and then asks the [`SuggestionProvider`] for values.
//! Starting a new fetch, [`SuggestionLoader::cancel`], or dropping the loader
//! cancels the running task. Every fetch carries a generation number and only
//! the current generation may publish its result, so a late answer from a
//! superseded fetch is discarded.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use valspec_foundation::{Error, ErrorKind, Result};

use crate::config::EditorConfig;
use crate::host::EditorHost;

/// Future returned by [`SuggestionProvider::fetch`].
pub type SuggestionFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;

/// Source of suggested values for a partially typed input.
pub trait SuggestionProvider: Send + Sync {
    /// Fetches suggestions for `input`.
    fn fetch<'a>(&'a self, input: &'a str) -> SuggestionFuture<'a>;
}

#[derive(Debug, Default)]
struct SuggestionState {
    values: Option<Vec<String>>,
    loading: bool,
    generation: u64,
}

/// Runs suggestion fetches for one field.
pub struct SuggestionLoader {
    provider: Arc<dyn SuggestionProvider>,
    debounce: Duration,
    state: Arc<Mutex<SuggestionState>>,
    token: Option<CancellationToken>,
    errors_tx: mpsc::UnboundedSender<Error>,
    errors_rx: mpsc::UnboundedReceiver<Error>,
}

impl SuggestionLoader {
    /// Creates a loader using the configured debounce delay.
    #[must_use]
    pub fn new(provider: Arc<dyn SuggestionProvider>, config: &EditorConfig) -> Self {
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            debounce: config.suggestion_debounce,
            state: Arc::new(Mutex::new(SuggestionState::default())),
            token: None,
            errors_tx,
            errors_rx,
        }
    }

    /// Returns the latest fetched values, or `None` before the first
    /// successful fetch.
    #[must_use]
    pub fn values(&self) -> Option<Vec<String>> {
        lock(&self.state).values.clone()
    }

    /// Returns true while a fetch is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Cancels any running fetch and starts a new one for `input`.
    ///
    /// # Errors
    /// Returns an error if called outside a tokio runtime.
    pub fn reload(&mut self, input: &str) -> Result<()> {
        self.cancel();
        let handle = Handle::try_current()
            .map_err(|err| Error::new(ErrorKind::Internal(format!("no async runtime: {err}"))))?;

        let generation = {
            let mut state = lock(&self.state);
            state.loading = true;
            state.generation
        };

        let token = CancellationToken::new();
        self.token = Some(token.clone());

        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let errors = self.errors_tx.clone();
        let debounce = self.debounce;
        let input = input.to_string();

        handle.spawn(async move {
            let fetch = async {
                tokio::time::sleep(debounce).await;
                provider.fetch(&input).await
            };

            tokio::select! {
                () = token.cancelled() => {
                    tracing::trace!(%input, "suggestion fetch cancelled");
                }
                result = fetch => {
                    let mut state = lock(&state);
                    if state.generation != generation {
                        tracing::trace!(%input, "discarding stale suggestions");
                        return;
                    }
                    state.loading = false;
                    match result {
                        Ok(values) => {
                            tracing::debug!(%input, count = values.len(), "suggestions loaded");
                            state.values = Some(values);
                        }
                        Err(err) => {
                            tracing::warn!(%input, %err, "suggestion fetch failed");
                            let _ = errors.send(err);
                        }
                    }
                }
            }
        });
        Ok(())
    }

    /// Cancels the running fetch, if any. Its result will not be applied.
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        let mut state = lock(&self.state);
        state.generation += 1;
        state.loading = false;
    }

    /// Cancels the running fetch and forgets loaded values.
    pub fn clean_up(&mut self) {
        self.cancel();
        lock(&self.state).values = None;
    }

    /// Forwards fetch failures received so far to the host.
    pub fn poll_errors(&mut self, host: &mut dyn EditorHost) {
        while let Ok(err) = self.errors_rx.try_recv() {
            host.alert_unhandled_error(&err);
        }
    }
}

impl Drop for SuggestionLoader {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl std::fmt::Debug for SuggestionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionLoader")
            .field("debounce", &self.debounce)
            .field("state", &*lock(&self.state))
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<SuggestionState>) -> MutexGuard<'_, SuggestionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
