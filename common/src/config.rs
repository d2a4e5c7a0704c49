use log::debug;

pub const DEFAULT_API_URL: &str = "https://api.thatstockpredictor.com";
pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_MODEL: &str = "xgb";

/// Overrides [`DEFAULT_API_URL`], read from the process env or a `.env` file.
pub const API_URL_ENV: &str = "PREDICTION_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub api_url: String,
    pub default_ticker: String,
    pub default_model: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            api_url: DEFAULT_API_URL.to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        match std::env::var(API_URL_ENV) {
            Ok(api_url) if !api_url.trim().is_empty() => Self::default().with_api_url(&api_url),
            _ => Self::default(),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim().trim_end_matches('/').to_string();
        self
    }
}
