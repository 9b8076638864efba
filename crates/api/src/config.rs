//! Process configuration, read from environment variables.

use expiry_ai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://smart-expiry.db?mode=rwc";

#[derive(Clone)]
pub struct ApiConfig {
    pub http_addr: String,
    pub database_url: String,
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    /// When set, pantry recipe requests go through this proxy instead of
    /// calling the model directly.
    pub recipe_proxy_url: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup (env, test map, ...). Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or_default = |key: &str, default: &str| {
            var(key).unwrap_or_else(|| {
                tracing::info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let groq_api_key = var("GROQ_API_KEY");
        if groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY not set; recipe suggestions will be unavailable");
        }

        Self {
            http_addr: or_default("HTTP_ADDR", DEFAULT_HTTP_ADDR),
            database_url: or_default("PANTRY_DATABASE_URL", DEFAULT_DATABASE_URL),
            groq_api_key,
            groq_base_url: or_default("GROQ_BASE_URL", DEFAULT_BASE_URL),
            groq_model: or_default("GROQ_MODEL", DEFAULT_MODEL),
            recipe_proxy_url: var("RECIPE_PROXY_URL"),
        }
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("http_addr", &self.http_addr)
            .field("database_url", &self.database_url)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("groq_base_url", &self.groq_base_url)
            .field("groq_model", &self.groq_model)
            .field("recipe_proxy_url", &self.recipe_proxy_url)
            .finish()
    }
}
