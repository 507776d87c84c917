//! Collaborator contract for geocoding and forecast lookups.
//!
//! The dispatcher consumes this trait as a black box: any failure is
//! collapsed into the generic unavailable outcome at the dispatcher
//! boundary, and the underlying cause only reaches the diagnostic log.

use async_trait::async_trait;

use super::types::{CompleteForecast, LocationMatch};

/// Failure inside a collaborator call.
///
/// Detail here is for the log only; clients never see it.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure of the outbound HTTP request.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a body we could not interpret.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// External operation handlers for the two gateway operations.
#[async_trait]
pub trait ForecastProvider: std::fmt::Debug + Send + Sync {
    /// Searches for locations matching `city`. Returns at most five matches.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on any transport or parse failure.
    async fn search_location(&self, city: &str) -> Result<Vec<LocationMatch>, ProviderError>;

    /// Fetches current conditions, the next 12 hours, and the 7-day outlook.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on any transport or parse failure.
    async fn get_complete_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CompleteForecast, ProviderError>;
}
