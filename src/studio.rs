//! The studio session: key gating, status rotation and the generation call,
//! with the key state threaded through explicitly by the caller.

use crate::{
    auth::{AuthGate, AuthState, EnvCredentialHost},
    config::StudioConfig,
    error::{Result, StudioError},
    gemini::GeminiClient,
    models::{AttributeSet, ImagePayload, ImageResult},
    status::StatusTicker,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied. Please select a valid API key with proper permissions.";
pub const KEY_REQUIRED_MESSAGE: &str = "API Key required. Please link your Google Cloud project.";

#[derive(Debug)]
pub struct StudioOutcome {
    pub state: AuthState,
    pub result: Result<ImageResult>,
}

impl StudioOutcome {
    /// Text to show for a failed generation, `None` on success.
    pub fn user_message(&self) -> Option<String> {
        let err = self.result.as_ref().err()?;
        let message = match err {
            StudioError::CredentialMissing if !self.state.has_credential() => {
                KEY_REQUIRED_MESSAGE.to_string()
            }
            err if err.is_access_error() => ACCESS_DENIED_MESSAGE.to_string(),
            err => err.to_string(),
        };
        Some(message)
    }
}

pub struct Studio {
    client: GeminiClient,
    gate: AuthGate,
    status: Arc<watch::Sender<&'static str>>,
    status_interval: Duration,
}

impl Studio {
    pub fn new(client: GeminiClient, gate: AuthGate, config: &StudioConfig) -> Self {
        let (status, _) = watch::channel("Initializing Studio...");
        Self {
            client,
            gate,
            status: Arc::new(status),
            status_interval: config.status_interval,
        }
    }

    /// HTTP transport plus a key gate backed by the environment.
    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        let client = GeminiClient::new(config)?;
        let gate = AuthGate::new(Arc::new(EnvCredentialHost::new(config.api_key.clone())));
        Ok(Self::new(client, gate, config))
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    pub fn subscribe_status(&self) -> watch::Receiver<&'static str> {
        self.status.subscribe()
    }

    pub async fn connect(&self) -> AuthState {
        let state = AuthState::from_present(self.gate.check_credential().await);
        log::info!("Initial key state: {:?}", state);
        state
    }

    pub async fn select_credential(&self, state: AuthState) -> (AuthState, Result<()>) {
        match self.gate.request_credential_selection().await {
            Ok(()) => {
                log::info!("API key selected");
                (state.after_selection(), Ok(()))
            }
            Err(e) => {
                log::error!("API Key selection failed: {}", e);
                (state, Err(e))
            }
        }
    }

    pub async fn generate(
        &self,
        state: AuthState,
        image: ImagePayload,
        attrs: AttributeSet,
    ) -> StudioOutcome {
        if !state.has_credential() {
            log::warn!("{}", KEY_REQUIRED_MESSAGE);
            return StudioOutcome {
                state,
                result: Err(StudioError::CredentialMissing),
            };
        }

        let ticker = StatusTicker::start(self.status.clone(), self.status_interval);
        let result = self.client.image().generate(image, attrs).await;
        ticker.stop();

        let state = match &result {
            Ok(image) => {
                log::info!("Generated studio image with {}", image.model);
                state
            }
            Err(e) => {
                log::error!("Generation failed: {}", e);
                state.after_failure(e)
            }
        };

        StudioOutcome { state, result }
    }
}
