use std::time::Duration;

/// Root of the FRED REST API.
pub const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "FRED_API_KEY";

/// Settings captured by [`crate::Client`] at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Read the API key from the process environment, loading `.env` first if one exists.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Query parameters sent with every request.
    pub fn default_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(key) = &self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }
        params.push(("file_type".to_string(), "json".to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_without_key_only_set_format() {
        let cfg = Config::default();
        assert_eq!(
            cfg.default_params(),
            vec![("file_type".to_string(), "json".to_string())]
        );
    }

    #[test]
    fn default_params_put_key_first() {
        let cfg = Config::default().with_api_key("abc");
        let params = cfg.default_params();
        assert_eq!(params[0], ("api_key".to_string(), "abc".to_string()));
        assert_eq!(params[1], ("file_type".to_string(), "json".to_string()));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let cfg = Config::default().with_base_url("http://127.0.0.1:9/fred/");
        assert_eq!(cfg.base_url, "http://127.0.0.1:9/fred");
    }
}
