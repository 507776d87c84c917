//! Request/response correlation: one inbound call, exactly one terminal
//! frame.
//!
//! The dispatcher validates arguments, invokes the collaborator, and
//! writes precisely one `result` or `error` frame on the owning channel.
//! Validation failures are normal protocol outcomes, not transport
//! failures; collaborator failures are collapsed into a fixed generic
//! message with the cause visible only in the log. A send against a
//! channel that closed mid-flight degrades silently.

use std::sync::Arc;

use serde::Deserialize;

use super::messages::{CallRequest, Operation};
use crate::domain::channel::{Frame, PushChannel};
use crate::error::GatewayError;
use crate::weather::ForecastProvider;

/// Frame-level error code for argument or operation validation failures.
const CODE_VALIDATION: u32 = 1003;

/// Executes accepted calls against the collaborator and frames the outcome.
#[derive(Debug)]
pub struct Dispatcher {
    provider: Arc<dyn ForecastProvider>,
}

/// Terminal failure of one call, already shaped for an `error` frame.
struct CallFailure {
    code: u32,
    message: String,
}

impl CallFailure {
    fn validation(message: impl Into<String>) -> Self {
        Self {
            code: CODE_VALIDATION,
            message: message.into(),
        }
    }

    fn unavailable() -> Self {
        Self {
            code: GatewayError::Unavailable.error_code(),
            message: GatewayError::Unavailable.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchLocationArgs {
    city: String,
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    latitude: f64,
    longitude: f64,
}

impl Dispatcher {
    /// Creates a dispatcher bound to the given collaborator.
    #[must_use]
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Runs one call to completion and writes its single terminal frame.
    ///
    /// Every outcome, including validation and collaborator failure, ends
    /// in exactly one frame on `channel`; if the channel closed while the
    /// call was in flight, the frame is dropped and only the diagnostic
    /// log records it.
    pub async fn dispatch(&self, channel: Arc<dyn PushChannel>, call: CallRequest) {
        let call_id = call
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let frame = match self.execute(&call).await {
            Ok(payload) => Frame::result(call_id, payload),
            Err(failure) => Frame::error(call_id, failure.code, failure.message),
        };

        if channel.send(frame).await.is_err() {
            tracing::debug!(
                operation = %call.operation,
                "channel closed before result delivery; frame dropped"
            );
        }
    }

    async fn execute(&self, call: &CallRequest) -> Result<serde_json::Value, CallFailure> {
        let Some(operation) = Operation::parse(&call.operation) else {
            return Err(CallFailure::validation(format!(
                "unknown operation: {}",
                call.operation
            )));
        };

        match operation {
            Operation::SearchLocation => {
                let args = parse_search_args(&call.arguments)?;
                let locations = self
                    .provider
                    .search_location(&args.city)
                    .await
                    .map_err(|err| {
                        tracing::warn!(error = %err, city = %args.city, "location search failed");
                        CallFailure::unavailable()
                    })?;
                to_payload(&locations)
            }
            Operation::GetCompleteForecast => {
                let args = parse_forecast_args(&call.arguments)?;
                let forecast = self
                    .provider
                    .get_complete_forecast(args.latitude, args.longitude)
                    .await
                    .map_err(|err| {
                        tracing::warn!(
                            error = %err,
                            latitude = args.latitude,
                            longitude = args.longitude,
                            "forecast fetch failed"
                        );
                        CallFailure::unavailable()
                    })?;
                to_payload(&forecast)
            }
        }
    }
}

fn parse_search_args(arguments: &serde_json::Value) -> Result<SearchLocationArgs, CallFailure> {
    let args: SearchLocationArgs =
        serde_json::from_value(arguments.clone()).map_err(|err| {
            CallFailure::validation(format!("invalid arguments for search_location: {err}"))
        })?;
    if args.city.trim().is_empty() {
        return Err(CallFailure::validation("city must be a non-empty string"));
    }
    Ok(args)
}

fn parse_forecast_args(arguments: &serde_json::Value) -> Result<ForecastArgs, CallFailure> {
    let args: ForecastArgs = serde_json::from_value(arguments.clone()).map_err(|err| {
        CallFailure::validation(format!(
            "invalid arguments for get_complete_forecast: {err}"
        ))
    })?;

    let mut issues = Vec::new();
    if !(-90.0..=90.0).contains(&args.latitude) {
        issues.push("latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&args.longitude) {
        issues.push("longitude must be between -180 and 180");
    }
    if issues.is_empty() {
        Ok(args)
    } else {
        Err(CallFailure::validation(issues.join("; ")))
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, CallFailure> {
    serde_json::to_value(value).map_err(|err| {
        tracing::error!(error = %err, "result payload serialization failed");
        CallFailure {
            code: GatewayError::Internal(String::new()).error_code(),
            message: "internal error".to_string(),
        }
    })
}
