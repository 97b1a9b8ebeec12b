/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DATALEONLABS_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "DATALEONLABS_BASE_URL";

/// Production endpoint used when `DATALEONLABS_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://inference.eu-west-1.dataleon.ai";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_key: std::env::var(API_KEY_ENV)
                .map_err(|_| anyhow::anyhow!("{} environment variable required", API_KEY_ENV))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("{} cannot be empty", API_KEY_ENV);
                    }
                    Ok(key)
                })?,
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("{} must start with http:// or https://", BASE_URL_ENV);
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Dataleon API base URL: {}", config.base_url);

        Ok(config)
    }
}

// Hand-written so the API key never reaches logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}
