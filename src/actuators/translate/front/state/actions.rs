use super::{Action, Conversation, Effect};
use crate::actuators::translate::front::api::TranslateApi;

/// Runs an effect to completion and returns the action that settles it.
pub async fn perform<A: TranslateApi>(api: &A, effect: Effect) -> Action {
    match effect {
        Effect::Send(request) => match api.translate(&request).await {
            Ok(reply) => Action::Resolve(reply),
            Err(error) => Action::Reject(error),
        },
    }
}

/// One full submission: user turn now, ai turn once the call settles.
pub async fn submit<A: TranslateApi>(conversation: &mut Conversation, api: &A, text: impl Into<String>) {
    if let Some(effect) = conversation.reduce(Action::Submit(text.into())) {
        let settled = perform(api, effect).await;
        conversation.reduce(settled);
    }
}

#[cfg(feature = "translate-front")]
pub use hooks::{SubmitAction, use_app_actions};

#[cfg(feature = "translate-front")]
mod hooks {
    use dioxus::prelude::*;
    use futures_util::{Future, StreamExt};

    use super::{super::State, Action, perform};
    use crate::actuators::translate::front::api::RelayClient;

    fn use_action<T, F>(handler: &'static impl Fn(State, T) -> F) -> Coroutine<T>
    where
        T: 'static,
        F: Future<Output = ()> + 'static,
    {
        let state = use_context::<State>();
        use_coroutine(move |mut rx: UnboundedReceiver<T>| async move {
            while let Some(arg) = rx.next().await {
                handler(state, arg).await;
            }
        })
    }

    pub fn use_app_actions() {
        use_action::<SubmitAction, _>(&handle_submit);
    }

    pub type SubmitAction = String;
    async fn handle_submit(mut state: State, text: SubmitAction) {
        let effect = state.conversation.with_mut(|c| c.reduce(Action::Submit(text)));
        if let Some(effect) = effect {
            let settled = perform(&RelayClient::default(), effect).await;
            state.conversation.with_mut(|c| {
                c.reduce(settled);
            });
        }
    }
}
