use std::time::Duration;

/// Transport-level failure of a request/response round trip.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    #[error("The message port closed before a response was received.")]
    PortClosed,

    #[error("No response received within {0:?}")]
    TimedOut(Duration),
}
