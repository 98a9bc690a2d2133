#[allow(unused_imports)]
use serde::{Deserialize, Serialize};
use thought_translator_macro::dto;

/// Body of `POST /api/translate`. Neither field is validated by the relay;
/// absent values are forwarded as absent.
#[dto(translate, request, clone, camel)]
pub struct TranslateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_query: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<Box<str>>,
}
