use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::Allow;
#[allow(unused_imports)]
use serde::{Deserialize, Serialize};
use thought_translator_macro::dto;

pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to fetch from the generation API.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Method {method} Not Allowed")]
    MethodNotAllowed { method: Method, allowed: Box<[Method]> },
    #[error("Bad Request: {0}")]
    BadRequest(Box<str>),
    #[error("API key is not configured.")]
    Misconfigured,
    #[error("{message}")]
    UpstreamStatus { status: StatusCode, message: Box<str> },
    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait CoercibleResult<T> {
    fn into_service_result(self) -> Result<T>;
}

impl<T, E> CoercibleResult<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_service_result(self) -> Result<T> {
        self.map_err(|e| anyhow::Error::from(e).into())
    }
}

#[dto(translate, response)]
pub struct HttpErrorBody {
    pub error: Box<str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Error::UpstreamStatus { status, .. } => *status,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(HttpErrorBody {
            error: self.to_string().into(),
        });

        match self {
            Error::MethodNotAllowed { allowed, .. } => {
                let allow: Allow = allowed.iter().cloned().collect();
                (status, TypedHeader(allow), body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
