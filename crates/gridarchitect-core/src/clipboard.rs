//! Clipboard copy with a legacy-then-async fallback, and the "copied" flag.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// How long the "copied" confirmation stays visible, in milliseconds.
pub const COPIED_RESET_MS: u32 = 2_000;

/// Clipboard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Copy failed (legacy: {legacy}; async: {fallback})")]
    Failed { legacy: String, fallback: String },
}

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Boxed future for async clipboard writes (no `Send` bound, for WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A platform clipboard that can write plain text.
pub trait Clipboard {
    /// Synchronous legacy write.
    fn write_legacy(&self, text: &str) -> ClipboardResult<()>;

    /// Asynchronous write.
    fn write_async(&self, text: String) -> BoxFuture<'_, ClipboardResult<()>>;
}

/// Which write path succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Legacy,
    Async,
}

/// Copy `text`, trying the legacy path first and the async path second.
pub async fn copy_text<C: Clipboard + ?Sized>(clipboard: &C, text: &str) -> ClipboardResult<CopyMethod> {
    let legacy = match clipboard.write_legacy(text) {
        Ok(()) => return Ok(CopyMethod::Legacy),
        Err(e) => e,
    };
    log::debug!("Legacy copy failed, trying async clipboard: {}", legacy);
    match clipboard.write_async(text.to_string()).await {
        Ok(()) => Ok(CopyMethod::Async),
        Err(e) => Err(ClipboardError::Failed {
            legacy: legacy.to_string(),
            fallback: e.to_string(),
        }),
    }
}

/// The "copied" confirmation flag.
///
/// Each successful copy bumps a generation counter. A reset only takes effect
/// when it carries the latest generation, so copying again inside the window
/// restarts the timer instead of being cut short by the earlier one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    copied: bool,
    generation: u64,
}

impl CopyFeedback {
    /// Whether the confirmation is showing.
    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Show the confirmation. Returns the token to pass to [`Self::reset`].
    pub fn mark_copied(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.copied = true;
        self.generation
    }

    /// Hide the confirmation if `token` is the latest one.
    /// Returns whether the flag changed.
    pub fn reset(&mut self, token: u64) -> bool {
        if self.copied && token == self.generation {
            self.copied = false;
            true
        } else {
            false
        }
    }
}
