use dioxus::prelude::*;

use super::ChatMessage;
use crate::Identifiable;
use crate::actuators::translate::front::state::{Action, State, actions::SubmitAction};

pub static CSS: Asset = asset!("/assets/chat.css");

#[component]
pub fn Chat() -> Element {
    let b = classnames::classname("chat");
    let mut state = use_context::<State>();
    let mut input = use_signal(String::new);
    let dispatch_submit = use_coroutine_handle::<SubmitAction>();

    let (turns, in_flight) = {
        let conversation = state.conversation.read();
        (conversation.turns().to_vec(), conversation.is_in_flight())
    };
    let can_send = state.conversation.read().can_submit(&input.read());

    let mut handle_send = move || {
        let text = input.read().clone();
        if !state.conversation.read().can_submit(&text) {
            return;
        }
        dispatch_submit.send(text);
        input.set(String::new());
    };

    let handle_keypress = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().shift() {
            evt.prevent_default();
            handle_send();
        }
    };

    rsx! {
        div { class: b.to_string(),
            header { class: b.el("header").to_string(),
                button {
                    class: b.el("home").to_string(),
                    onclick: move |_| {
                        state.conversation.with_mut(|c| {
                            c.reduce(Action::GoHome);
                        });
                    },
                    "Thought Translator"
                }
            }
            div { class: b.el("history").to_string(),
                for (id, turn) in turns.into_iter().map(|turn| (turn.get_id(), turn)) {
                    ChatMessage {
                        key: "{id}",
                        turn: turn,
                    }
                }
                if in_flight {
                    p { class: b.el("pending").to_string(), "Decoding your thought..." }
                }
            }
            div { class: b.el("input").to_string(),
                textarea {
                    class: b.el("input-field").to_string(),
                    placeholder: "Type your raw, unclear thought here...",
                    value: "{input}",
                    disabled: in_flight,
                    onkeydown: handle_keypress,
                    oninput: move |evt| input.set(evt.value()),
                }
                button {
                    class: b.el("send-button").to_string(),
                    disabled: !can_send,
                    onclick: move |_| handle_send(),
                    "Send"
                }
            }
        }
    }
}
