use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ ViaCEP Models ============

/// Address record returned by the ViaCEP lookup service.
///
/// All fields default to empty strings since the not-found payload only
/// carries the `erro` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalLocation {
    /// Postal code as formatted by ViaCEP (e.g. "01310-100").
    #[serde(default)]
    pub cep: String,
    /// Street name.
    #[serde(default)]
    pub logradouro: String,
    /// Address complement.
    #[serde(default)]
    pub complemento: String,
    /// District / neighbourhood.
    #[serde(default)]
    pub bairro: String,
    /// City name.
    #[serde(default)]
    pub localidade: String,
    /// State abbreviation (e.g. "SP").
    #[serde(default)]
    pub uf: String,
    /// IBGE municipality code.
    #[serde(default)]
    pub ibge: String,
    /// GIA code (São Paulo only).
    #[serde(default)]
    pub gia: String,
    /// Telephone area code.
    #[serde(default)]
    pub ddd: String,
    /// SIAFI municipality code.
    #[serde(default)]
    pub siafi: String,
}

/// Raw ViaCEP payload: the address plus the loosely typed "not found" flag.
#[derive(Debug, Deserialize)]
pub struct ViaCepResponse {
    #[serde(flatten)]
    pub location: PostalLocation,
    #[serde(default)]
    pub erro: Option<Value>,
}

impl ViaCepResponse {
    /// Whether the `erro` sentinel is present and truthy.
    ///
    /// ViaCEP has sent both `true` and `"true"` over time.
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => !s.is_empty() && !s.eq_ignore_ascii_case("false"),
            Some(_) => true,
        }
    }

    pub fn into_lookup(self) -> CepLookup {
        if self.is_not_found() {
            CepLookup::NotFound
        } else {
            CepLookup::Found(self.location)
        }
    }
}

/// Outcome of a postal code lookup that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum CepLookup {
    Found(PostalLocation),
    NotFound,
}

// ============ wttr.in Models ============

#[derive(Debug, Deserialize)]
pub struct WttrResponse {
    #[serde(default)]
    pub current_condition: Vec<WttrCurrentCondition>,
}

#[derive(Debug, Deserialize)]
pub struct WttrCurrentCondition {
    /// Celsius temperature, sent as a numeric-looking string.
    #[serde(rename = "temp_C", default)]
    pub temp_c: Option<String>,
}

// ============ API Models ============

/// Current temperature in the three supported units.
///
/// Fahrenheit and Kelvin are always derived from Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 9.0 / 5.0 + 32.0,
            kelvin: celsius + 273.15,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
