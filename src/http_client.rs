use crate::config::Config;
use crate::errors::AppError;
use std::time::Duration;

/// Builds the outbound client shared by every resolver.
///
/// Created once at startup. `reqwest::Client` is an `Arc` handle, so clones
/// share the same connection pool and settings.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .pool_max_idle_per_host(config.http_pool_max_idle)
        .pool_idle_timeout(Duration::from_secs(config.http_pool_idle_timeout_secs))
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .user_agent(concat!("weather-by-cep/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Upstream(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = build_http_client(&Config::default());
        assert!(client.is_ok());
    }
}
