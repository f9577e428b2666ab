use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// High quality tier, the only one that accepts an `imageSize` directive.
pub const DEFAULT_PRIMARY_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_IMAGE_SIZE: &str = "2K";
pub const DEFAULT_ASPECT_RATIO: &str = "3:4";
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(2);

const DEFAULT_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Where the Gemini API key comes from. Env sources are read on every
/// resolve so a key selected after startup is picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Static(String),
    Env(Vec<String>),
}

impl Default for ApiKeySource {
    fn default() -> Self {
        ApiKeySource::Env(DEFAULT_KEY_VARS.iter().map(|v| v.to_string()).collect())
    }
}

impl ApiKeySource {
    pub fn env(var: impl Into<String>) -> Self {
        ApiKeySource::Env(vec![var.into()])
    }

    /// First non-blank key, trimmed.
    pub fn resolve(&self) -> Option<String> {
        let usable = |key: &str| {
            let key = key.trim();
            (!key.is_empty()).then(|| key.to_string())
        };
        match self {
            ApiKeySource::Static(key) => usable(key.as_str()),
            ApiKeySource::Env(vars) => vars
                .iter()
                .find_map(|var| env::var(var).ok().and_then(|key| usable(key.as_str()))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_key: ApiKeySource,
    pub base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub image_size: String,
    pub aspect_ratio: String,
    pub status_interval: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            api_key: ApiKeySource::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            status_interval: DEFAULT_STATUS_INTERVAL,
            request_timeout: None,
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("MODERA_API_KEY_VAR")
            .ok()
            .map(ApiKeySource::env)
            .unwrap_or(defaults.api_key);
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url);
        let primary_model = env::var("MODERA_PRIMARY_MODEL").unwrap_or(defaults.primary_model);
        let fallback_model = env::var("MODERA_FALLBACK_MODEL").unwrap_or(defaults.fallback_model);
        let request_timeout = env::var("MODERA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        StudioConfig {
            api_key,
            base_url,
            primary_model,
            fallback_model,
            request_timeout,
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = ApiKeySource::Static(api_key.into());
        self
    }

    pub fn with_api_key_source(mut self, source: ApiKeySource) -> Self {
        self.api_key = source;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_models(
        mut self,
        primary_model: impl Into<String>,
        fallback_model: impl Into<String>,
    ) -> Self {
        self.primary_model = primary_model.into();
        self.fallback_model = fallback_model.into();
        self
    }

    pub fn with_image_size(mut self, image_size: impl Into<String>) -> Self {
        self.image_size = image_size.into();
        self
    }

    pub fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
