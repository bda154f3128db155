/// Alias for `Result<T, EventsError>`.
pub type EventsResult<T> = Result<T, EventsError>;

/// Errors raised while configuring an event processor.
///
/// Processing itself never fails: per-event failures are recorded in
/// [`crate::ProcessedEvents::failed`].
#[derive(Debug, thiserror::Error)]
pub enum EventsError {
    /// Processor options could not be parsed.
    #[error("invalid processor options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
