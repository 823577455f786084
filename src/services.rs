use crate::config::Config;
use crate::errors::AppError;
use crate::models::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Resolves a normalized CEP into an address.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError>;
}

/// Fetches the current temperature for a Brazilian city.
#[async_trait]
pub trait WeatherResolver: Send + Sync {
    async fn current_temperature(&self, city: &str, state: &str)
        -> Result<Temperature, AppError>;
}

pub struct ViaCepService {
    client: Client,
    base_url: String,
    fallback_base_url: Option<String>,
}

impl ViaCepService {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.viacep_base_url.clone(),
            fallback_base_url: config.viacep_fallback_base_url.clone(),
        }
    }

    fn lookup_url(base_url: &str, cep: &str) -> String {
        format!("{}/ws/{}/json/", base_url, cep)
    }

    /// Send the lookup, retrying once on the fallback base if the primary
    /// request never produced a response.
    async fn send_lookup(&self, cep: &str) -> Result<reqwest::Response, AppError> {
        let url = Self::lookup_url(&self.base_url, cep);
        tracing::info!("ViaCEP: looking up CEP {}", cep);

        let err = match self.client.get(&url).send().await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        let Some(ref fallback_base) = self.fallback_base_url else {
            return Err(AppError::Upstream(format!("ViaCEP request failed: {}", err)));
        };

        let fallback_url = Self::lookup_url(fallback_base, cep);
        tracing::warn!(
            "ViaCEP request to {} failed ({}), retrying on {}",
            url,
            err,
            fallback_url
        );

        self.client
            .get(&fallback_url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("ViaCEP fallback request failed: {}", e)))
    }
}

#[async_trait]
impl LocationResolver for ViaCepService {
    async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError> {
        let response = self.send_lookup(cep).await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            tracing::error!("ViaCEP returned status {} for CEP {}", status, cep);
            return Err(AppError::Upstream(format!(
                "ViaCEP returned status {}",
                status
            )));
        }

        let body: ViaCepResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse ViaCEP response: {}", e))
        })?;

        let lookup = body.into_lookup();
        match lookup {
            CepLookup::Found(ref location) => tracing::info!(
                "ViaCEP: CEP {} resolved to {}/{}",
                cep,
                location.localidade,
                location.uf
            ),
            CepLookup::NotFound => tracing::info!("ViaCEP: CEP {} not found", cep),
        }

        Ok(lookup)
    }
}

pub struct WttrService {
    client: Client,
    base_url: String,
}

impl WttrService {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.weather_base_url.clone(),
        }
    }

    /// Path segment for `"city,state,Brazil"`: spaces become `+`, then the
    /// whole string is form-encoded (so `+` ends up as `%2B`).
    pub fn location_query(city: &str, state: &str) -> String {
        let location = format!(
            "{},{},Brazil",
            city.replace(' ', "+"),
            state.replace(' ', "+")
        );
        url::form_urlencoded::byte_serialize(location.as_bytes()).collect()
    }
}

/// Parse wttr.in's string-typed Celsius value.
pub fn parse_celsius(raw: Option<&str>) -> Result<f64, AppError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Upstream("wttr.in temp_C missing".to_string()))?;

    let celsius: f64 = raw
        .parse()
        .map_err(|e| AppError::Upstream(format!("Invalid temp_C {:?}: {}", raw, e)))?;

    if !celsius.is_finite() {
        return Err(AppError::Upstream(format!("Non-finite temp_C {:?}", raw)));
    }

    Ok(celsius)
}

#[async_trait]
impl WeatherResolver for WttrService {
    async fn current_temperature(
        &self,
        city: &str,
        state: &str,
    ) -> Result<Temperature, AppError> {
        let url = format!(
            "{}/{}?format=j1",
            self.base_url,
            Self::location_query(city, state)
        );
        tracing::info!("wttr.in: fetching weather for {}/{}", city, state);
        tracing::debug!("wttr.in URL: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            tracing::error!("wttr.in returned status {}", status);
            return Err(AppError::Upstream(format!(
                "wttr.in returned status {}",
                status
            )));
        }

        let body: WttrResponse = response.json().await.map_err(|e| {
            AppError::Upstream(format!("Failed to parse wttr.in response: {}", e))
        })?;

        let current = body
            .current_condition
            .first()
            .ok_or(AppError::WeatherUnavailable)?;

        let celsius = parse_celsius(current.temp_c.as_deref())?;
        let temperature = Temperature::from_celsius(celsius);

        tracing::info!(
            "wttr.in: {}/{} is {}°C",
            city,
            state,
            temperature.celsius
        );
        Ok(temperature)
    }
}
