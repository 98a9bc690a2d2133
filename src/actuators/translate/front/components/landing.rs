use dioxus::prelude::*;

use crate::actuators::translate::front::state::{Action, State};

pub static CSS: Asset = asset!("/assets/landing.css");

const MODES: [&str; 3] = ["Learning Mode", "Productivity Mode", "Creative Mode"];

#[component]
pub fn Landing() -> Element {
    let b = classnames::classname("landing");
    let mut state = use_context::<State>();

    rsx! {
        div { class: b.to_string(),
            h1 { class: b.el("title").to_string(), "AI Thought Translator" }
            p { class: b.el("tagline").to_string(),
                "Decode the underlying concept behind your raw ideas. Read what you meant, not just what you wrote."
            }
            div { class: b.el("modes").to_string(),
                for mode in MODES {
                    span { class: b.el("mode").to_string(), "{mode}" }
                }
            }
            button {
                class: b.el("start").to_string(),
                onclick: move |_| {
                    state.conversation.with_mut(|c| {
                        c.reduce(Action::StartChat);
                    });
                },
                "Get Started"
            }
        }
    }
}
