use thought_translator_macro::{Identifiable, dto};
use tracing::{error, warn};
use uuid::Uuid;

pub mod actions;

use super::api::{ClientError, RelayReply};
use crate::actuators::translate::dto::TranslateRequest;
use crate::prompts;

pub const ERROR_PREFIX: &str = "Sorry, I encountered an error: ";
pub const GREETING: &str = "Hello! I am the AI Thought Translator. What raw, unclear thought can I decode into a structured concept for you?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Ai => "ai",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Ai => "Translator",
        }
    }
}

#[dto(translate, clone, ui)]
#[derive(Identifiable)]
pub struct Turn {
    pub id: Uuid,
    pub role: Role,
    pub content: Box<str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Landing,
    Chat,
}

#[derive(Debug)]
pub enum Action {
    StartChat,
    GoHome,
    Submit(String),
    Resolve(RelayReply),
    Reject(ClientError),
}

/// Work the caller has to carry out after a reduction.
#[derive(Debug)]
pub enum Effect {
    Send(TranslateRequest),
}

/// Conversation state for one UI session. It opens with the translator's
/// greeting; turns are only ever appended and at most one request is in flight.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<Turn>,
    in_flight: bool,
    view: View,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        let mut conversation = Self {
            turns: Vec::new(),
            in_flight: false,
            view: View::default(),
        };
        conversation.push(Role::Ai, GREETING.into());
        conversation
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn can_submit(&self, text: &str) -> bool {
        !self.in_flight && !text.trim().is_empty()
    }

    pub fn reduce(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::StartChat => {
                self.view = View::Chat;
                None
            }
            Action::GoHome => {
                self.view = View::Landing;
                None
            }
            Action::Submit(text) => {
                if !self.can_submit(&text) {
                    return None;
                }
                let request = TranslateRequest {
                    user_query: Some(prompts::user_query(&text)),
                    system_prompt: Some(prompts::system()),
                };
                self.push(Role::User, text.into());
                self.in_flight = true;
                Some(Effect::Send(request))
            }
            Action::Resolve(reply) => {
                self.settle(reply.interpret());
                None
            }
            Action::Reject(error) => {
                self.settle(Err(error));
                None
            }
        }
    }

    fn settle(&mut self, outcome: Result<Box<str>, ClientError>) {
        if !self.in_flight {
            warn!("Dropping a response that arrived with no request in flight");
            return;
        }
        self.in_flight = false;
        let content = match outcome {
            Ok(text) => text,
            Err(error) => {
                error!("API call error: {}", error);
                format!("{ERROR_PREFIX}{error}").into()
            }
        };
        self.push(Role::Ai, content);
    }

    fn push(&mut self, role: Role, content: Box<str>) {
        self.turns.push(Turn {
            id: Uuid::new_v4(),
            role,
            content,
        });
    }
}

#[cfg(feature = "translate-front")]
pub use signals::{State, use_app_state};

#[cfg(feature = "translate-front")]
mod signals {
    use dioxus::prelude::*;

    use super::Conversation;

    #[derive(Debug, Clone, Copy)]
    pub struct State {
        pub conversation: Signal<Conversation>,
    }

    pub fn use_app_state() -> State {
        use_context_provider::<State>(|| State {
            conversation: Signal::new(Conversation::new()),
        })
    }
}
