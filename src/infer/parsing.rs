use serde::Deserialize;
use thiserror::Error;

use super::gemini::GenerateContentResponse;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// A body after the one explicit parsing step: either something that looks
/// like a generation, or an error envelope with whatever message it carried.
#[derive(Debug)]
pub enum ParsedBody {
    Generation(GenerateContentResponse),
    Error(Option<Box<str>>),
}

// Covers both `{ "error": "text" }` from the relay and
// `{ "error": { "code": 429, "message": "text", "status": "..." } }` from the API.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(Box<str>),
    Status {
        #[serde(default)]
        message: Option<Box<str>>,
    },
}

impl ErrorDetail {
    fn into_message(self) -> Option<Box<str>> {
        match self {
            ErrorDetail::Message(message) => Some(message),
            ErrorDetail::Status { message } => message,
        }
        .filter(|message| !message.trim().is_empty())
    }
}

pub fn parse_body(body: &str) -> Result<ParsedBody, ParseError> {
    // Try parsing as error response first
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Ok(ParsedBody::Error(envelope.error.into_message()));
    }

    serde_json::from_str::<GenerateContentResponse>(body)
        .map(ParsedBody::Generation)
        .map_err(ParseError::InvalidJson)
}

/// Message embedded in an error body, if the body is structured and has one.
pub fn error_message(body: &str) -> Option<Box<str>> {
    match parse_body(body) {
        Ok(ParsedBody::Error(message)) => message,
        _ => None,
    }
}
