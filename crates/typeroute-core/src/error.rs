//! Error types for the router module

use thiserror::Error;

/// Router error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No routing table entry for the type key
    #[error("No route registered for type key: {0}")]
    UnknownKey(String),

    /// The entry exists but none of its suffixes matches the type value
    #[error("Type key {key} has no variant for type value {value}")]
    UnknownVariant { key: String, value: String },

    /// The reconstructed method name is not invocable on the receiver
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RouteError {
    /// Whether this error is one of the misses a silent routed call swallows
    pub fn is_silent_miss(&self) -> bool {
        matches!(
            self,
            RouteError::UnknownKey(_)
                | RouteError::UnknownVariant { .. }
                | RouteError::MethodNotFound(_)
        )
    }
}
