use crate::cep::validate_cep;
use crate::config::Config;
use crate::errors::AppError;
use crate::http_client::build_http_client;
use crate::models::{CepLookup, Temperature};
use crate::services::{LocationResolver, ViaCepService, WeatherResolver, WttrService};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{Method, StatusCode},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Postal code lookup (ViaCEP in production).
    pub location: Arc<dyn LocationResolver>,
    /// Current weather lookup (wttr.in in production).
    pub weather: Arc<dyn WeatherResolver>,
}

impl AppState {
    pub fn new(location: Arc<dyn LocationResolver>, weather: Arc<dyn WeatherResolver>) -> Self {
        Self { location, weather }
    }

    /// Wires the production resolvers around one shared outbound client.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = build_http_client(config)?;
        Ok(Self::new(
            Arc::new(ViaCepService::new(client.clone(), config)),
            Arc::new(WttrService::new(client, config)),
        ))
    }
}

/// Health check endpoint.
///
/// Returns the service status and version. Does not touch the upstreams.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "weather-by-cep",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /weatherbycep/{cep}
///
/// Resolves the CEP to a city through ViaCEP, then returns the current
/// temperature there in Celsius, Fahrenheit and Kelvin.
///
/// # Returns
///
/// * `Result<Json<Temperature>, AppError>` - The temperature or a JSON error body.
pub async fn weather_by_cep(
    State(state): State<Arc<AppState>>,
    cep: Result<Path<String>, PathRejection>,
) -> Result<Json<Temperature>, AppError> {
    let Path(raw_cep) = cep.map_err(|e| {
        tracing::debug!("Rejected CEP path segment: {}", e);
        AppError::InvalidCep
    })?;
    tracing::info!("GET /weatherbycep/{}", raw_cep);

    let temperature = resolve_weather(&state, &raw_cep).await?;
    Ok(Json(temperature))
}

/// GET /weatherbycep/ with nothing after the prefix.
pub async fn missing_cep() -> AppError {
    AppError::MissingCep
}

/// Any non-GET method on the weather routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Any path without a route. The method is checked before the path.
pub async fn endpoint_not_found(method: Method) -> AppError {
    if method != Method::GET {
        return AppError::MethodNotAllowed;
    }
    AppError::EndpointNotFound
}

/// Validate → lookup → weather. Stops at the first failing step.
pub async fn resolve_weather(state: &AppState, raw_cep: &str) -> Result<Temperature, AppError> {
    if raw_cep.is_empty() {
        return Err(AppError::MissingCep);
    }

    let (valid, cep) = validate_cep(raw_cep);
    if !valid {
        return Err(AppError::InvalidCep);
    }

    let location = match state.location.lookup(&cep).await? {
        CepLookup::Found(location) => location,
        CepLookup::NotFound => return Err(AppError::CepNotFound),
    };

    state
        .weather
        .current_temperature(&location.localidade, &location.uf)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostalLocation;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeLocation {
        result: Result<CepLookup, AppError>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LocationResolver for FakeLocation {
        async fn lookup(&self, cep: &str) -> Result<CepLookup, AppError> {
            self.seen.lock().unwrap().push(cep.to_string());
            self.result.clone()
        }
    }

    struct FakeWeather {
        result: Result<Temperature, AppError>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl WeatherResolver for FakeWeather {
        async fn current_temperature(
            &self,
            city: &str,
            state: &str,
        ) -> Result<Temperature, AppError> {
            self.seen
                .lock()
                .unwrap()
                .push((city.to_string(), state.to_string()));
            self.result.clone()
        }
    }

    fn sao_paulo() -> CepLookup {
        CepLookup::Found(PostalLocation {
            cep: "01310-100".to_string(),
            localidade: "São Paulo".to_string(),
            uf: "SP".to_string(),
            ..Default::default()
        })
    }

    fn state_with(
        location: Result<CepLookup, AppError>,
        weather: Result<Temperature, AppError>,
    ) -> (AppState, Arc<FakeLocation>, Arc<FakeWeather>) {
        let location = Arc::new(FakeLocation {
            result: location,
            seen: Mutex::new(Vec::new()),
        });
        let weather = Arc::new(FakeWeather {
            result: weather,
            seen: Mutex::new(Vec::new()),
        });
        (
            AppState::new(location.clone(), weather.clone()),
            location,
            weather,
        )
    }

    #[tokio::test]
    async fn test_pipeline_success_passes_normalized_cep_and_city() {
        let (state, location, weather) =
            state_with(Ok(sao_paulo()), Ok(Temperature::from_celsius(21.0)));

        let temperature = resolve_weather(&state, "01310-100").await.unwrap();

        assert_eq!(temperature, Temperature::from_celsius(21.0));
        assert_eq!(*location.seen.lock().unwrap(), vec!["01310100".to_string()]);
        assert_eq!(
            *weather.seen.lock().unwrap(),
            vec![("São Paulo".to_string(), "SP".to_string())]
        );
    }

    #[tokio::test]
    async fn test_pipeline_empty_cep() {
        let (state, location, _) = state_with(Ok(sao_paulo()), Ok(Temperature::from_celsius(1.0)));
        assert_eq!(resolve_weather(&state, "").await, Err(AppError::MissingCep));
        assert!(location.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_invalid_cep_skips_lookup() {
        let (state, location, _) = state_with(Ok(sao_paulo()), Ok(Temperature::from_celsius(1.0)));
        assert_eq!(resolve_weather(&state, "123").await, Err(AppError::InvalidCep));
        assert!(location.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_not_found_skips_weather() {
        let (state, _, weather) =
            state_with(Ok(CepLookup::NotFound), Ok(Temperature::from_celsius(1.0)));
        assert_eq!(
            resolve_weather(&state, "00000000").await,
            Err(AppError::CepNotFound)
        );
        assert!(weather.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_propagates_resolver_errors() {
        let upstream = AppError::Upstream("timeout".to_string());
        let (state, _, weather) =
            state_with(Err(upstream.clone()), Ok(Temperature::from_celsius(1.0)));
        assert_eq!(resolve_weather(&state, "01310100").await, Err(upstream));
        assert!(weather.seen.lock().unwrap().is_empty());

        let (state, _, _) = state_with(Ok(sao_paulo()), Err(AppError::WeatherUnavailable));
        assert_eq!(
            resolve_weather(&state, "01310100").await,
            Err(AppError::WeatherUnavailable)
        );
    }

    #[tokio::test]
    async fn test_unknown_path_checks_method_first() {
        assert_eq!(endpoint_not_found(Method::GET).await, AppError::EndpointNotFound);
        for method in [Method::POST, Method::HEAD, Method::OPTIONS, Method::PUT] {
            assert_eq!(endpoint_not_found(method).await, AppError::MethodNotAllowed);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, Json(body)) = health().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "weather-by-cep");
    }
}
