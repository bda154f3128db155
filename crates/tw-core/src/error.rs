/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building events or reading their payloads.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An event was created with an empty type discriminator.
    #[error("event type must not be empty")]
    EmptyEventType,

    /// A payload field required by the reader is absent.
    #[error("event '{event_type}' is missing data field '{field}'")]
    MissingField {
        /// The type of the event being read.
        event_type: String,
        /// The absent field.
        field: String,
    },

    /// A payload field exists but does not have the expected shape.
    #[error("event '{event_type}' has invalid data field '{field}': {source}")]
    InvalidField {
        /// The type of the event being read.
        event_type: String,
        /// The malformed field.
        field: String,
        /// The underlying decode failure.
        source: serde_json::Error,
    },

    /// An entity slot required by the reader is absent.
    #[error("event '{event_type}' has no {slot} entity")]
    MissingEntity {
        /// The type of the event being read.
        event_type: String,
        /// Which slot was empty (`actor`, `target`, ...).
        slot: &'static str,
    },

    /// Encoding or decoding a whole event failed.
    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
