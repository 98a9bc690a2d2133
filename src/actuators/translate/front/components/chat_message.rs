use dioxus::prelude::*;

use crate::actuators::translate::front::state::Turn;

pub static CSS: Asset = asset!("/assets/chat_message.css");

#[component]
pub fn ChatMessage(turn: Turn) -> Element {
    let b = classnames::classname("chat-message");
    let b = b.attr(turn.role.as_str());
    let author = turn.role.display_name();
    let rendered_markdown = match markdown::to_html_with_options(&turn.content, &markdown::Options::gfm()) {
        Ok(rendered) => rendered,
        Err(_) => markdown::to_html(&turn.content),
    };

    rsx! {
        div {
            class: b.to_string(),
            p {
                class: b.el("author").to_string(),
                "{author}"
            }
            div {
                class: b.el("text").to_string(),
                dangerous_inner_html: rendered_markdown
            }
        }
    }
}
