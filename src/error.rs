/// Failure taxonomy for a sensor run.
///
/// Every variant is fatal: the binary prints the PRTG error document and
/// exits non-zero. Partial channel lists are never emitted.
#[derive(thiserror::Error, Debug)]
pub enum SensorError {
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("http error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(serde_json::Error),

    #[error("invalid request url: {0}")]
    Url(url::ParseError),

    #[error("pagination stalled on {path} after {pages} pages")]
    PaginationStalled { path: String, pages: usize },
}
