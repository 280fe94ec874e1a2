//! Preview error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    /// The relay server could not bind its listening socket.
    #[error("relay server failed to bind: {0}")]
    Bind(String),

    /// A relay request body was not a valid relay message.
    #[error("malformed relay message: {0}")]
    MalformedRelay(#[from] serde_json::Error),

    /// A relay body parsed as JSON but was not an object.
    #[error("malformed relay message: expected a JSON object")]
    NotAnObject,

    /// A relay message arrived on a channel other than the console channel.
    #[error("unexpected relay channel '{0}'")]
    UnknownChannel(String),

    /// The relay request body exceeded the accepted size.
    #[error("relay message too large ({0} bytes)")]
    TooLarge(usize),

    /// The document source could not produce a composed document.
    #[error("failed to compose preview: {0}")]
    Compose(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
