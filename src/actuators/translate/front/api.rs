use reqwest::Client;
use thiserror::Error;
use tracing::warn;

use crate::actuators::translate::dto::TranslateRequest;
use crate::infer::{ParseError, ParsedBody, parse_body};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3000";
const TRANSLATE_PATH: &str = "/api/translate";

/// Relay base URL baked in at build time.
pub fn relay_url() -> &'static str {
    option_env!("TRANSLATE_RELAY_URL").unwrap_or(DEFAULT_RELAY_URL)
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(Box<str>),

    /// The relay answered with a structured `{ error }` body.
    #[error("{message}")]
    Relay { status: u16, message: Box<str> },

    /// The relay (or something in front of it) answered with a body that is
    /// not structured error data.
    #[error("{body}")]
    Unstructured { status: u16, body: Box<str> },

    #[error("API call failed with status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(#[source] ParseError),

    #[error("API returned no content. Check safety settings or prompt.")]
    NoContent,
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.to_string().into())
    }
}

/// Status and body exactly as the relay sent them.
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub status: u16,
    pub body: Box<str>,
}

impl RelayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Generated text of the first candidate, or the best error available.
    pub fn interpret(&self) -> Result<Box<str>, ClientError> {
        let status = self.status;
        if !self.is_success() {
            return Err(match parse_body(&self.body) {
                Ok(ParsedBody::Error(Some(message))) => ClientError::Relay { status, message },
                _ if !self.body.trim().is_empty() => ClientError::Unstructured {
                    status,
                    body: self.body.clone(),
                },
                _ => ClientError::Status(status),
            });
        }

        match parse_body(&self.body).map_err(ClientError::Malformed)? {
            ParsedBody::Generation(response) => match response.first_text() {
                Some(text) => Ok(text.into()),
                None => {
                    warn!(reason = ?response.no_content_reason(), "Generation returned no content");
                    Err(ClientError::NoContent)
                }
            },
            ParsedBody::Error(Some(message)) => Err(ClientError::Relay { status, message }),
            ParsedBody::Error(None) => Err(ClientError::NoContent),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait TranslateApi {
    async fn translate(&self, request: &TranslateRequest) -> Result<RelayReply, ClientError>;
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    url: Box<str>,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            client: Client::new(),
            url: format!("{base_url}{TRANSLATE_PATH}").into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(relay_url())
    }
}

impl TranslateApi for RelayClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<RelayReply, ClientError> {
        let response = self.client.post(&*self.url).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RelayReply {
            status,
            body: body.into(),
        })
    }
}
