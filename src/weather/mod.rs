//! Weather and geocoding collaborators.
//!
//! Thin, stateless modules behind the [`ForecastProvider`] seam. The
//! correlation core never sees HTTP or Open-Meteo field names; it calls
//! the trait and treats any failure as the generic unavailable outcome.

pub mod codes;
pub mod open_meteo;
pub mod provider;
pub mod types;

pub use codes::translate_code;
pub use open_meteo::OpenMeteoProvider;
pub use provider::{ForecastProvider, ProviderError};
pub use types::{
    CompleteForecast, CurrentConditions, DailyForecast, HourlyForecast, LocationMatch,
};
