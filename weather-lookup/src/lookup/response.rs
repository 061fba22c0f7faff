//! Wire shape of the WeatherAPI.com `current.json` response, only the fields we read.

use serde::Deserialize;

use crate::model::WeatherReport;

#[derive(Debug, Deserialize)]
pub(super) struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
    last_updated: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherReport {
    fn from(parsed: WaResponse) -> Self {
        Self {
            city: parsed.location.name,
            country: parsed.location.country,
            temperature: parsed.current.temp_c,
            condition: parsed.current.condition.text,
            humidity: parsed.current.humidity,
            wind_speed: parsed.current.wind_kph,
            last_updated: parsed.current.last_updated,
        }
    }
}
