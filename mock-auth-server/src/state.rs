use crate::config::{Credentials, Settings};
use std::sync::Arc;
use std::time::Duration;

/// `/slow` never answers faster than this, whatever the settings say
pub(crate) const MIN_SLOW_DELAY: Duration = Duration::from_secs(1);

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_credentials(settings, Credentials::default())
    }

    pub fn with_credentials(settings: Settings, credentials: Credentials) -> Self {
        Self {
            settings: Arc::new(settings),
            credentials: Arc::new(credentials),
        }
    }

    /// Delay applied by the `/slow` endpoint, clamped to [`MIN_SLOW_DELAY`]
    pub fn slow_delay(&self) -> Duration {
        Duration::from_millis(self.settings.slow_delay_ms).max(MIN_SLOW_DELAY)
    }
}
