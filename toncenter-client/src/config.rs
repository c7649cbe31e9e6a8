//! Configuration for the toncenter adapter

use std::time::Duration;

/// Toncenter connection configuration
#[derive(Debug, Clone)]
pub struct ToncenterConfig {
    /// API base URL
    pub base_url: String,

    /// Optional API key, sent as `X-API-Key`
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Interval between account polls in subscription mode
    pub poll_interval: Duration,

    /// Page size used when draining fresh transactions
    pub fetch_page_size: usize,

    /// How many polls `wait_for_block` makes before giving up
    pub readiness_attempts: u32,
}

impl Default for ToncenterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://toncenter.com/api/v2".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(3),
            fetch_page_size: 16,
            readiness_attempts: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToncenterConfig::default();
        assert_eq!(config.base_url, "https://toncenter.com/api/v2");
        assert!(config.api_key.is_none());
        assert_eq!(config.fetch_page_size, 16);
    }
}
