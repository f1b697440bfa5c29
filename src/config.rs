//! Configuration loading and management

use anyhow::Result;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Language tag handed to the speech recognizer
    pub language: String,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let language =
            std::env::var("VOICETASK_LANGUAGE").unwrap_or_else(|_| "en-US".to_string());

        Ok(Self { language })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_defaults() {
        let config = Config::load().unwrap();
        assert!(!config.language.is_empty());
    }
}
