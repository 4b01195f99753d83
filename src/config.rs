use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_VISION_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub vision_model: String,
    pub image_model: String,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            api_key: None,
            endpoint: DEFAULT_GATEWAY_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the bearer credential out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("vision_model", &self.vision_model)
            .field("image_model", &self.image_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        GatewayConfig {
            api_key: non_empty_var("AI_GATEWAY_API_KEY"),
            endpoint: non_empty_var("AI_GATEWAY_URL").unwrap_or(defaults.endpoint),
            vision_model: non_empty_var("VISION_MODEL").unwrap_or(defaults.vision_model),
            image_model: non_empty_var("IMAGE_MODEL").unwrap_or(defaults.image_model),
            timeout_secs: non_empty_var("GATEWAY_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_models(
        mut self,
        vision_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        self.vision_model = vision_model.into();
        self.image_model = image_model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_image_bytes: usize,
    pub gateway: GatewayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        Config {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port: non_empty_var("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            max_image_bytes: non_empty_var("MAX_IMAGE_BYTES")
                .and_then(|bytes| bytes.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            gateway: GatewayConfig::from_env(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub fn with_gateway(mut self, config: GatewayConfig) -> Self {
        self.gateway = config;
        self
    }

    /// Largest request body the server accepts: base64 inflates by 4/3,
    /// plus room for the data URI prefix and the JSON envelope.
    pub fn payload_limit(&self) -> usize {
        self.max_image_bytes / 3 * 4 + 64 * 1024
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::new();
        assert_eq!(config.endpoint, DEFAULT_GATEWAY_URL);
        assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        assert!(!GatewayConfig::new().with_api_key("   ").has_credentials());
        assert!(GatewayConfig::new().with_api_key("sk-test").has_credentials());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GatewayConfig::new().with_api_key("sk-very-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_payload_limit_covers_encoded_image() {
        let config = Config::new().with_max_image_bytes(3 * 1024 * 1024);
        assert!(config.payload_limit() > 4 * 1024 * 1024);
    }
}
