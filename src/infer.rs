//! Wire types and parsing for the Gemini `generateContent` API.

mod error;
pub mod gemini;
pub mod parsing;

pub use error::ApiError;
pub use gemini::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
pub use parsing::{ParseError, ParsedBody, error_message, parse_body};

#[cfg(feature = "translate-in")]
pub use gemini::{GeminiClient, Generator, UpstreamReply};
