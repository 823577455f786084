//! Weather by CEP API Library
//!
//! Resolves a Brazilian postal code (CEP) to a city through ViaCEP, then
//! reports the current temperature there from wttr.in in Celsius,
//! Fahrenheit and Kelvin.
//!
//! # Modules
//!
//! - `cep`: CEP validation and normalization.
//! - `config`: Configuration management.
//! - `errors`: Error taxonomy and its HTTP mapping.
//! - `handlers`: HTTP request handlers and the request pipeline.
//! - `http_client`: Shared outbound HTTP client.
//! - `models`: API and upstream data models.
//! - `router`: Route table and middleware.
//! - `services`: External service clients (ViaCEP, wttr.in).

pub mod cep;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod http_client;
pub mod models;
pub mod router;
pub mod services;
