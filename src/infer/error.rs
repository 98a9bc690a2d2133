use thiserror::Error;

use super::parsing::ParseError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[cfg(feature = "client-http2")]
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Response parsing failed: {0}")]
    MalformedBody(#[from] ParseError),
}
