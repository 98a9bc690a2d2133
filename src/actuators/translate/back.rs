use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

mod credential;
mod handlers;

pub use credential::{Credential, CredentialSource, EnvCredential, StaticCredential};
pub use handlers::{RELAY_PATH, build_router};

use crate::config::relay::RelayConfig;
use crate::infer::{GeminiClient, Generator};

/// Everything a relay invocation reads. Nothing in here is mutated after startup.
pub struct RelayState {
    pub credentials: Arc<dyn CredentialSource>,
    pub generator: Arc<dyn Generator>,
}

impl RelayState {
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            credentials: Arc::new(EnvCredential::new(&config.credential_var)),
            generator: Arc::new(GeminiClient::new(&config.api_base, &config.model)),
        }
    }
}

pub async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let state = Arc::new(RelayState::from_config(&config));
    if state.credentials.credential().is_none() {
        tracing::warn!(
            "{} is not set, every request will fail until it is",
            config.credential_var
        );
    }

    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting relay on {} for model {}", addr, config.model);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, router.into_make_service())
        .await
        .context("Relay server stopped")?;
    Ok(())
}
