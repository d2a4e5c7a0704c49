use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No usable response came back from the prediction API. The message
    /// carries the transport cause, e.g. a refused connection.
    #[error("{}", with_causes(.0))]
    Network(#[source] reqwest::Error),

    #[error("Backend error: {status} {body}")]
    Backend { status: u16, body: String },

    #[error("Failed to parse prediction payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// `outer: cause: root cause`, following `source()` to the end.
fn with_causes(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
