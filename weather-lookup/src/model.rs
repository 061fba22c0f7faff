use serde::{Deserialize, Serialize};
use thiserror::Error;

/// City used when a caller does not name one.
pub const DEFAULT_CITY: &str = "London";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// Falls back to [`DEFAULT_CITY`] when `city` is absent.
    pub fn or_default(city: Option<String>) -> Self {
        city.map(Self::new).unwrap_or_default()
    }
}

impl Default for WeatherQuery {
    fn default() -> Self {
        Self::new(DEFAULT_CITY)
    }
}

/// Flat record built from a successful provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Kilometres per hour.
    pub wind_speed: f64,
    /// Provider-formatted timestamp, kept as-is.
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Connection error, timeout, redirect exhaustion or a 4xx/5xx status.
    #[error("{message}")]
    Transport { message: String },

    /// The body was not the JSON shape the provider documents.
    #[error("{message}")]
    MalformedResponse { message: String },
}

impl LookupError {
    pub fn message(&self) -> &str {
        match self {
            LookupError::Transport { message } | LookupError::MalformedResponse { message } => {
                message
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Transport { .. })
    }
}

pub type WeatherResult = Result<WeatherReport, LookupError>;
