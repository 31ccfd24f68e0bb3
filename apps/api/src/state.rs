use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when `GOOGLE_AI_KEY` is unset; model-backed routes then fail with a configuration error.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// The one conversation this service holds. Chat turns keep the lock for their whole duration.
    pub session: Arc<Mutex<Session>>,
    chat_in_flight: Arc<AtomicBool>,
}

/// Held for the duration of one chat turn; clears the in-flight flag on drop.
#[derive(Debug)]
pub struct ChatPermit(Arc<AtomicBool>);

impl Drop for ChatPermit {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AppState {
    pub fn new(config: Config, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            config,
            generator,
            session: Arc::new(Mutex::new(Session::new())),
            chat_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configured generator, or the fixed "API key not configured" error.
    pub fn generator(&self) -> Result<Arc<dyn TextGenerator>, AppError> {
        self.generator.clone().ok_or_else(AppError::missing_api_key)
    }

    /// Claims the single chat slot. Fails with `Busy` while another turn holds it.
    pub fn begin_chat(&self) -> Result<ChatPermit, AppError> {
        self.chat_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(ChatPermit(self.chat_in_flight.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let config = Config {
            google_ai_key: None,
            llm_model: "test-model".to_string(),
            llm_timeout_secs: 5,
            max_upload_bytes: 1024,
            port: 0,
            rust_log: "debug".to_string(),
        };
        AppState::new(config, None)
    }

    #[test]
    fn test_second_chat_permit_is_busy_until_first_drops() {
        let state = state();
        let permit = state.begin_chat().unwrap();
        assert!(matches!(state.clone().begin_chat(), Err(AppError::Busy)));

        drop(permit);
        assert!(state.begin_chat().is_ok());
    }
}
