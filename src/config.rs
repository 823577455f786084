use serde::Deserialize;

pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://wttr.in";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub viacep_base_url: String,
    /// Alternate base tried once when the primary lookup fails at the transport level.
    pub viacep_fallback_base_url: Option<String>,
    pub weather_base_url: String,
    pub http_timeout_secs: u64,
    pub http_pool_max_idle: usize,
    pub http_pool_idle_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            viacep_fallback_base_url: derive_fallback_url(DEFAULT_VIACEP_BASE_URL),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            http_timeout_secs: 30,
            http_pool_max_idle: 10,
            http_pool_idle_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let viacep_base_url = base_url_var("VIACEP_BASE_URL", DEFAULT_VIACEP_BASE_URL)?;

        let fallback_enabled = match std::env::var("CEP_HTTP_FALLBACK") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                anyhow::anyhow!("CEP_HTTP_FALLBACK must be true or false, got {:?}", raw)
            })?,
            Err(_) => true,
        };

        let viacep_fallback_base_url = if !fallback_enabled {
            None
        } else {
            match std::env::var("VIACEP_FALLBACK_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
            {
                Some(url) => Some(validate_base_url("VIACEP_FALLBACK_BASE_URL", url)?),
                None => derive_fallback_url(&viacep_base_url),
            }
        };

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            viacep_base_url,
            viacep_fallback_base_url,
            weather_base_url: base_url_var("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL)?,
            http_timeout_secs: positive_var("HTTP_TIMEOUT_SECS", 30)?,
            http_pool_max_idle: std::env::var("HTTP_POOL_MAX_IDLE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_POOL_MAX_IDLE must be a non-negative number"))?,
            http_pool_idle_timeout_secs: positive_var("HTTP_POOL_IDLE_TIMEOUT_SECS", 30)?,
        };

        tracing::debug!("ViaCEP Base URL: {}", config.viacep_base_url);
        match config.viacep_fallback_base_url {
            Some(ref fallback) => {
                tracing::warn!("ViaCEP transport fallback enabled: {}", fallback)
            }
            None => tracing::debug!("ViaCEP transport fallback disabled"),
        }
        tracing::debug!("Weather Base URL: {}", config.weather_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Plain-HTTP twin of an HTTPS base URL. Plain-HTTP bases have no fallback.
pub fn derive_fallback_url(base_url: &str) -> Option<String> {
    base_url
        .strip_prefix("https://")
        .map(|rest| format!("http://{}", rest))
}

fn base_url_var(name: &str, default: &str) -> anyhow::Result<String> {
    let url = std::env::var(name).unwrap_or_else(|_| default.to_string());
    validate_base_url(name, url)
}

fn validate_base_url(name: &str, url: String) -> anyhow::Result<String> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn positive_var(name: &str, default: u64) -> anyhow::Result<u64> {
    let value: u64 = match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name))?,
        Err(_) => default,
    };
    if value == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
