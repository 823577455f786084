use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::models::ErrorResponse;

/// Application-specific error types.
///
/// Every variant maps to one fixed HTTP status and one fixed message string.
/// Upstream details are kept for the server log and never reach the client.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The path carried no postal code after the route prefix.
    MissingCep,
    /// The postal code is not 8 digits after removing separators.
    InvalidCep,
    /// The lookup service reported the postal code as unknown.
    CepNotFound,
    /// The request path does not match any route.
    EndpointNotFound,
    /// The route exists but only answers GET.
    MethodNotAllowed,
    /// Transport, status or decoding failure talking to an external API.
    Upstream(String),
    /// The weather service returned no current condition.
    WeatherUnavailable,
}

impl AppError {
    /// HTTP status returned to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCep => StatusCode::BAD_REQUEST,
            AppError::InvalidCep => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CepNotFound | AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Upstream(_) | AppError::WeatherUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable message sent in the JSON body.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::MissingCep => "cep parameter is required",
            AppError::InvalidCep => "invalid zipcode",
            AppError::CepNotFound => "can not find zipcode",
            AppError::EndpointNotFound => "endpoint not found",
            AppError::MethodNotAllowed => "method not allowed",
            AppError::Upstream(_) => "internal server error",
            AppError::WeatherUnavailable => "weather data not available",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upstream(detail) => write!(f, "External API error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Logs errors based on their severity: upstream failures at `error`,
    /// client mistakes at `debug`.
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(detail) => {
                tracing::error!("External API error: {}", detail);
            }
            AppError::WeatherUnavailable => {
                tracing::warn!("Weather data not available for resolved location");
            }
            other => {
                tracing::debug!("Rejecting request: {}", other.message());
            }
        }

        let body = Json(ErrorResponse {
            message: self.message().to_string(),
        });

        (self.status_code(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}
