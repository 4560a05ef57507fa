use thiserror::Error;

/// Error types for live chat engine operations
///
/// Nothing in this enum is fatal to the process: every error path degrades
/// to a logged or reported condition while the engine keeps serving other
/// sessions.
///
/// # Examples
///
/// ```
/// use livedesk_chat_engine::{LiveChatError, Result};
///
/// fn check_rating(value: u8) -> Result<()> {
///     if !(1..=5).contains(&value) {
///         return Err(LiveChatError::invalid_input("rating must be 1-5"));
///     }
///     Ok(())
/// }
///
/// assert!(check_rating(0).is_err());
/// assert!(check_rating(4).is_ok());
/// ```
#[derive(Error, Debug)]
pub enum LiveChatError {
    /// Malformed event payload, rejected before any state mutation
    ///
    /// # Examples
    /// - Rating value outside 1-5
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced identity could not be located
    ///
    /// # Examples
    /// - Agent-originated event naming an identity outside the configured pool
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid engine configuration, rejected at construction
    ///
    /// # Examples
    /// - Duplicate agent identities in the pool
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Outbound delivery to one recipient failed
    ///
    /// Returned by transport implementations. The server loop logs these and
    /// continues with the remaining intents of the same event, so a blocked
    /// or unreachable recipient never stalls sibling notifications.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Unexpected internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for LiveChatError {
    fn from(err: anyhow::Error) -> Self {
        // Anyhow errors are usually unexpected failures from lower-level
        // components, so map them to Internal.
        Self::Internal(err.to_string())
    }
}

impl LiveChatError {
    /// Create a new InvalidInput error with the provided message
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new NotFound error with the provided message
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Configuration error with the provided message
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new Delivery error with the provided message
    pub fn delivery<S: Into<String>>(msg: S) -> Self {
        Self::Delivery(msg.into())
    }

    /// Create a new Internal error with the provided message
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for live chat engine operations
pub type Result<T> = std::result::Result<T, LiveChatError>;
