use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Box<str>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: Option<&str>) -> Self {
        Self {
            parts: vec![Part { text: text.map(Box::from) }],
        }
    }

    /// First non-empty text part.
    pub fn text(&self) -> Option<&str> {
        self.parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .find(|text| !text.is_empty())
    }
}

/// Body of a `generateContent` call. Missing prompt text is omitted from its
/// part rather than rejected; the API decides what to do with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
}

impl GenerateContentRequest {
    pub fn new(user_query: Option<&str>, system_prompt: Option<&str>) -> Self {
        Self {
            contents: vec![Content::from_text(user_query)],
            system_instruction: Content::from_text(system_prompt),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<Box<str>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<Box<str>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first()?.content.as_ref()?.text()
    }

    /// Why the API produced nothing: the prompt block reason, or else the
    /// first candidate's finish reason.
    pub fn no_content_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
            .or_else(|| self.candidates.first()?.finish_reason.as_deref())
    }
}

#[cfg(feature = "translate-in")]
pub use client::{GeminiClient, Generator, UpstreamReply};

#[cfg(feature = "translate-in")]
mod client {
    use async_trait::async_trait;

    use super::GenerateContentRequest;
    use crate::actuators::translate::back::Credential;
    use crate::infer::ApiError;

    /// What the generation API answered, untouched.
    #[derive(Debug, Clone)]
    pub struct UpstreamReply {
        pub status: u16,
        pub body: Box<str>,
    }

    impl UpstreamReply {
        pub fn is_success(&self) -> bool {
            (200..300).contains(&self.status)
        }
    }

    #[async_trait]
    pub trait Generator: Send + Sync {
        async fn generate(
            &self,
            credential: &Credential,
            request: &GenerateContentRequest,
        ) -> Result<UpstreamReply, ApiError>;
    }

    pub struct GeminiClient {
        client: reqwest::Client,
        url: Box<str>,
    }

    impl GeminiClient {
        pub fn new(api_base: &str, model: &str) -> Self {
            let api_base = api_base.trim_end_matches('/');
            Self {
                client: reqwest::Client::new(),
                url: format!("{api_base}/v1beta/models/{model}:generateContent").into(),
            }
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    #[async_trait]
    impl Generator for GeminiClient {
        async fn generate(
            &self,
            credential: &Credential,
            request: &GenerateContentRequest,
        ) -> Result<UpstreamReply, ApiError> {
            let response = self
                .client
                .post(&*self.url)
                .query(&[("key", credential.expose())])
                .json(request)
                .send()
                .await
                // The URL carries the key, keep it out of error messages
                .map_err(reqwest::Error::without_url)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            Ok(UpstreamReply {
                status,
                body: body.into(),
            })
        }
    }
}
