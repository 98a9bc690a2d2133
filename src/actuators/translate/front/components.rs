use dioxus::prelude::*;

mod chat;
mod chat_message;
mod landing;

pub use chat::Chat;
pub use chat_message::ChatMessage;
pub use landing::Landing;

use super::state::{self, State, View};

#[component]
pub fn Style() -> Element {
    rsx! {
        document::Stylesheet { href: chat::CSS }
        document::Stylesheet { href: chat_message::CSS }
        document::Stylesheet { href: landing::CSS }
    }
}

#[component]
pub fn App() -> Element {
    state::use_app_state();
    state::actions::use_app_actions();
    let state = use_context::<State>();
    let view = state.conversation.read().view();

    rsx! {
        Style {}
        if view == View::Landing {
            Landing {}
        } else {
            Chat {}
        }
    }
}
