//! Cancellation context threaded through factories.

use tokio_util::sync::CancellationToken;

/// Context passed to every factory invocation.
///
/// The registry never checks for cancellation itself; the token exists so
/// that factories performing blocking I/O can observe a caller's cancel
/// request. A default context is never cancelled.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
}

impl Context {
    /// A context that is never cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context driven by the caller's cancellation token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
