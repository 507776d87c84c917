//! Weather and geocoding result types.
//!
//! These are the payload shapes written into `result` frames. Field names
//! are the gateway's own contract; the Open-Meteo field remapping happens
//! entirely inside the collaborator implementation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One geocoding match for a city search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationMatch {
    /// Place name as reported by the geocoding service.
    pub name: String,
    /// Country the place belongs to; empty when the service omits it.
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Current weather conditions at the requested coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentConditions {
    /// Local timestamp of the observation (`YYYY-MM-DDTHH:MM`).
    pub time: String,
    /// Air temperature in °C.
    pub temperature_c: f64,
    /// Apparent ("feels like") temperature in °C.
    pub apparent_temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity_pct: f64,
    /// Wind speed in km/h.
    pub wind_speed_kmh: f64,
    /// Human-readable conditions label.
    pub conditions: String,
}

/// One hour of forecast within the next-12-hours window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HourlyForecast {
    /// Local timestamp of the hour (`YYYY-MM-DDTHH:MM`).
    pub time: String,
    /// Air temperature in °C.
    pub temperature_c: f64,
    /// Human-readable conditions label.
    pub conditions: String,
    /// Precipitation probability in percent, when the service supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_chance_pct: Option<f64>,
}

/// One day of the seven-day outlook.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyForecast {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Daily maximum temperature in °C.
    pub temperature_max_c: f64,
    /// Daily minimum temperature in °C.
    pub temperature_min_c: f64,
    /// Human-readable conditions label.
    pub conditions: String,
    /// Maximum precipitation probability in percent, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_chance_pct: Option<f64>,
}

/// Complete forecast: current conditions plus the hourly and daily outlook.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompleteForecast {
    /// Conditions right now.
    pub current: CurrentConditions,
    /// Hourly entries within `[0, 12)` hours of the current observation.
    pub next_12_hours: Vec<HourlyForecast>,
    /// Up to seven daily entries.
    pub next_7_days: Vec<DailyForecast>,
}
