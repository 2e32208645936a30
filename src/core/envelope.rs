//! # Result Envelope
//!
//! Every fetch outcome travels as an `Envelope`:
//!
//! ```text
//! trigger ──► Loading ──► Success(data)
//!                    └──► Error(message)
//! ```
//!
//! The next trigger replaces whatever is there with a fresh `Loading`.
//! Nothing is merged between invocations.

/// Message used when a failure carries no text of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Loading,
    Success(T),
    /// Always non-empty; build through [`Envelope::error`].
    Error(String),
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(data)
    }

    /// Wraps a failure message, substituting the fallback for blank input.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Envelope::Error(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            Envelope::Error(message)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Envelope::Loading)
    }

    /// True once the envelope holds a terminal value.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Error(message) => Some(message),
            _ => None,
        }
    }
}
