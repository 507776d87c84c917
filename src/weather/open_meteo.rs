//! Open-Meteo backed [`ForecastProvider`].
//!
//! Thin, stateless HTTP collaborator: one `GET` per operation, then a
//! pure remapping of the Open-Meteo response shape into the gateway's
//! result types. The remapping functions take the raw structs so they
//! unit-test without any network.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use super::codes::translate_code;
use super::provider::{ForecastProvider, ProviderError};
use super::types::{
    CompleteForecast, CurrentConditions, DailyForecast, HourlyForecast, LocationMatch,
};
use crate::config::GatewayConfig;

/// Hours of hourly forecast included after the current observation.
const HOURLY_WINDOW_HOURS: i64 = 12;
/// Maximum daily entries returned.
const DAILY_LIMIT: usize = 7;
/// Maximum geocoding matches returned.
const LOCATION_LIMIT: usize = 5;

/// [`ForecastProvider`] backed by the Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    /// Builds the provider with a bounded-timeout HTTP client.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the HTTP client cannot be constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn search_location(&self, city: &str) -> Result<Vec<LocationMatch>, ProviderError> {
        let response = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: GeocodingResponse = response.json().await?;
        Ok(map_locations(body))
    }

    async fn get_complete_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CompleteForecast, ProviderError> {
        let response = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                (
                    "current",
                    "temperature_2m,apparent_temperature,relative_humidity_2m,\
                     wind_speed_10m,weather_code",
                ),
                (
                    "hourly",
                    "temperature_2m,weather_code,precipitation_probability",
                ),
                (
                    "daily",
                    "weather_code,temperature_2m_max,temperature_2m_min,\
                     precipitation_probability_max",
                ),
                ("forecast_days", "7"),
                ("timezone", "auto"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: ForecastResponse = response.json().await?;
        map_forecast(body)
    }
}

// Raw Open-Meteo response shapes. Only the fields we remap are listed.

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    #[serde(default)]
    country: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: RawCurrent,
    hourly: RawHourly,
    daily: RawDaily,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    time: String,
    temperature_2m: f64,
    apparent_temperature: f64,
    relative_humidity_2m: f64,
    wind_speed_10m: f64,
    weather_code: i64,
}

#[derive(Debug, Deserialize)]
struct RawHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i64>,
    #[serde(default)]
    precipitation_probability: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    weather_code: Vec<i64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    precipitation_probability_max: Option<Vec<Option<f64>>>,
}

/// Open-Meteo timestamps come in local time with minute precision.
fn parse_local_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn map_locations(body: GeocodingResponse) -> Vec<LocationMatch> {
    body.results
        .into_iter()
        .take(LOCATION_LIMIT)
        .map(|entry| LocationMatch {
            name: entry.name,
            country: entry.country,
            latitude: entry.latitude,
            longitude: entry.longitude,
        })
        .collect()
}

/// Remaps a raw forecast response into the gateway shape.
///
/// Hourly entries are filtered to the half-open window `[0, 12)` hours
/// relative to the current-conditions timestamp; rows whose own timestamp
/// fails to parse are skipped. Daily entries are truncated to the first
/// seven supplied.
fn map_forecast(body: ForecastResponse) -> Result<CompleteForecast, ProviderError> {
    let observed_at = parse_local_time(&body.current.time).ok_or_else(|| {
        ProviderError::Decode(format!(
            "unparseable current-conditions time {:?}",
            body.current.time
        ))
    })?;
    let window_end = observed_at + Duration::hours(HOURLY_WINDOW_HOURS);

    let current = CurrentConditions {
        time: body.current.time,
        temperature_c: body.current.temperature_2m,
        apparent_temperature_c: body.current.apparent_temperature,
        humidity_pct: body.current.relative_humidity_2m,
        wind_speed_kmh: body.current.wind_speed_10m,
        conditions: translate_code(body.current.weather_code).to_string(),
    };

    let mut next_12_hours = Vec::new();
    for (idx, time) in body.hourly.time.iter().enumerate() {
        let Some(at) = parse_local_time(time) else {
            continue;
        };
        if at < observed_at || at >= window_end {
            continue;
        }
        let (Some(temperature), Some(code)) = (
            body.hourly.temperature_2m.get(idx),
            body.hourly.weather_code.get(idx),
        ) else {
            continue;
        };
        let precipitation_chance_pct = body
            .hourly
            .precipitation_probability
            .as_ref()
            .and_then(|column| column.get(idx))
            .copied()
            .flatten();
        next_12_hours.push(HourlyForecast {
            time: time.clone(),
            temperature_c: *temperature,
            conditions: translate_code(*code).to_string(),
            precipitation_chance_pct,
        });
    }

    let mut next_7_days = Vec::new();
    for (idx, date) in body.daily.time.iter().take(DAILY_LIMIT).enumerate() {
        let (Some(max), Some(min), Some(code)) = (
            body.daily.temperature_2m_max.get(idx),
            body.daily.temperature_2m_min.get(idx),
            body.daily.weather_code.get(idx),
        ) else {
            continue;
        };
        let precipitation_chance_pct = body
            .daily
            .precipitation_probability_max
            .as_ref()
            .and_then(|column| column.get(idx))
            .copied()
            .flatten();
        next_7_days.push(DailyForecast {
            date: date.clone(),
            temperature_max_c: *max,
            temperature_min_c: *min,
            conditions: translate_code(*code).to_string(),
            precipitation_chance_pct,
        });
    }

    Ok(CompleteForecast {
        current,
        next_12_hours,
        next_7_days,
    })
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn hourly_fixture(times: Vec<&str>) -> RawHourly {
        let n = times.len();
        RawHourly {
            time: times.into_iter().map(String::from).collect(),
            temperature_2m: vec![10.0; n],
            weather_code: vec![0; n],
            precipitation_probability: Some(vec![Some(20.0); n]),
        }
    }

    fn daily_fixture(days: usize) -> RawDaily {
        RawDaily {
            time: (1..=days).map(|d| format!("2026-08-{d:02}")).collect(),
            weather_code: vec![3; days],
            temperature_2m_max: vec![25.0; days],
            temperature_2m_min: vec![15.0; days],
            precipitation_probability_max: None,
        }
    }

    fn forecast_fixture(hourly: RawHourly, daily: RawDaily) -> ForecastResponse {
        ForecastResponse {
            current: RawCurrent {
                time: "2026-08-01T09:00".to_string(),
                temperature_2m: 21.5,
                apparent_temperature: 20.9,
                relative_humidity_2m: 55.0,
                wind_speed_10m: 12.0,
                weather_code: 2,
            },
            hourly,
            daily,
        }
    }

    #[test]
    fn hourly_window_is_half_open_twelve_hours() {
        let hourly = hourly_fixture(vec![
            "2026-08-01T08:00", // before the observation: excluded
            "2026-08-01T09:00", // exactly at the observation: included
            "2026-08-01T15:00", // inside: included
            "2026-08-01T20:00", // inside: included
            "2026-08-01T21:00", // exactly +12h: excluded (half-open)
            "2026-08-02T09:00", // next day: excluded
        ]);
        let Ok(forecast) = map_forecast(forecast_fixture(hourly, daily_fixture(7))) else {
            panic!("mapping failed");
        };
        let times: Vec<&str> = forecast
            .next_12_hours
            .iter()
            .map(|h| h.time.as_str())
            .collect();
        assert_eq!(
            times,
            vec!["2026-08-01T09:00", "2026-08-01T15:00", "2026-08-01T20:00"]
        );
    }

    #[test]
    fn unparseable_hourly_rows_are_skipped() {
        let hourly = hourly_fixture(vec!["garbage", "2026-08-01T10:00"]);
        let Ok(forecast) = map_forecast(forecast_fixture(hourly, daily_fixture(7))) else {
            panic!("mapping failed");
        };
        assert_eq!(forecast.next_12_hours.len(), 1);
    }

    #[test]
    fn unparseable_current_time_fails_the_call() {
        let mut response = forecast_fixture(hourly_fixture(vec![]), daily_fixture(7));
        response.current.time = "not-a-time".to_string();
        assert!(matches!(
            map_forecast(response),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn daily_is_truncated_to_seven() {
        let Ok(forecast) = map_forecast(forecast_fixture(hourly_fixture(vec![]), daily_fixture(10)))
        else {
            panic!("mapping failed");
        };
        assert_eq!(forecast.next_7_days.len(), 7);
        assert_eq!(forecast.next_7_days[0].date, "2026-08-01");
        assert_eq!(forecast.next_7_days[6].date, "2026-08-07");
    }

    #[test]
    fn short_daily_column_is_kept_as_is() {
        let Ok(forecast) = map_forecast(forecast_fixture(hourly_fixture(vec![]), daily_fixture(3)))
        else {
            panic!("mapping failed");
        };
        assert_eq!(forecast.next_7_days.len(), 3);
    }

    #[test]
    fn current_conditions_are_labeled() {
        let Ok(forecast) = map_forecast(forecast_fixture(hourly_fixture(vec![]), daily_fixture(7)))
        else {
            panic!("mapping failed");
        };
        assert_eq!(forecast.current.conditions, "Partly cloudy");
        assert!((forecast.current.temperature_c - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn geocoding_results_are_capped_at_five() {
        let results = (0..8)
            .map(|i| GeocodingResult {
                name: format!("Paris {i}"),
                country: "France".to_string(),
                latitude: 48.85,
                longitude: 2.35,
            })
            .collect();
        let matches = map_locations(GeocodingResponse { results });
        assert_eq!(matches.len(), 5);
    }

    #[test]
    fn missing_geocoding_results_mean_empty_list() {
        let body: GeocodingResponse = serde_json::from_str("{}").unwrap_or_else(|_| {
            panic!("empty geocoding body should deserialize");
        });
        assert!(map_locations(body).is_empty());
    }
}
