use thiserror::Error;

/// Errors raised by an event transport on publish.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The transport rejected or could not accept the event.
    #[error("event transport failure: {0}")]
    Transport(String),

    /// No consumer side exists any more (e.g. the channel is closed).
    #[error("event channel closed")]
    ChannelClosed,
}
