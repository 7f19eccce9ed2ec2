use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::provider::{HttpProvider, ModelProvider};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: API key -> (count, window_start).
    /// Only keys that passed `is_valid_api_key` get an entry, so the map never
    /// outgrows `config.api_keys`.
    pub rate_limiter: Arc<DashMap<String, (u32, Instant)>>,

    /// Provider asked for a response when a request carries none
    pub provider: Option<Arc<dyn ModelProvider>>,
}

impl ServerState {
    /// Create new server state, building an HTTP provider when
    /// `provider_url` is configured.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let provider = match config.provider_url.as_deref() {
            Some(url) => {
                let provider = HttpProvider::new(
                    url,
                    config.provider_auth_header.clone(),
                    config.provider_timeout(),
                )?;
                Some(Arc::new(provider) as Arc<dyn ModelProvider>)
            }
            None => None,
        };

        Ok(Self::with_provider(config, provider))
    }

    /// Create state around an explicit provider.
    pub fn with_provider(config: ServerConfig, provider: Option<Arc<dyn ModelProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            provider,
        }
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    /// Check rate limit for API key
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = Instant::now();
        let window = Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_blocks_after_limit() {
        let config = ServerConfig {
            rate_limit_per_minute: 2,
            ..ServerConfig::default()
        };
        let state = ServerState::with_provider(config, None);
        assert!(state.check_rate_limit("k"));
        assert!(state.check_rate_limit("k"));
        assert!(!state.check_rate_limit("k"));
        assert!(state.check_rate_limit("other"));
    }

    #[test]
    fn provider_built_from_url() {
        let config = ServerConfig {
            provider_url: Some("http://localhost:1/generate".into()),
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert!(state.provider.is_some());

        let state = ServerState::new(ServerConfig::default()).unwrap();
        assert!(state.provider.is_none());
    }
}
