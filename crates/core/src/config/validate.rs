use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Upstream API key is present
/// - Upstream timeout and image limit are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.upstream.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "upstream.api_key cannot be empty".to_string(),
        ));
    }

    if config.upstream.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "upstream.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.upstream.breed_image_limit == 0 {
        return Err(ConfigError::ValidationError(
            "upstream.breed_image_limit cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, UpstreamConfig, VotingConfig};

    fn valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            upstream: UpstreamConfig {
                api_key: "key".to_string(),
                base_url: "https://api.thecatapi.com/v1".to_string(),
                timeout_secs: 30,
                sub_id: "user-123".to_string(),
                breed_image_limit: 8,
            },
            voting: VotingConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.server.port = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = valid_config();
        config.upstream.api_key.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = valid_config();
        config.upstream.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_image_limit_fails() {
        let mut config = valid_config();
        config.upstream.breed_image_limit = 0;
        assert!(validate_config(&config).is_err());
    }
}
