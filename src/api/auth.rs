//! Shared-secret authentication middleware.
//!
//! Applied to the streaming and call endpoints; the health endpoint stays
//! open. When authentication is required but no secret is configured, the
//! gateway fails closed: every guarded request gets a server error rather
//! than a silent pass-through.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// Header carrying the shared secret.
pub const AUTH_HEADER: &str = "x-api-key";

/// Resolved authentication policy for the guarded endpoints.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Whether the header check is enforced at all.
    pub required: bool,
    /// The expected shared secret, when one is configured.
    pub token: Option<String>,
}

impl AuthSettings {
    /// Extracts the authentication policy from the gateway configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            required: config.auth_required,
            token: config.auth_token.clone(),
        }
    }

    /// Checks one request's headers against the policy.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::AuthMisconfigured`] when enforcement is on but no
    ///   secret is configured (fail closed).
    /// - [`GatewayError::Unauthorized`] when the header is absent or does
    ///   not match.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), GatewayError> {
        if !self.required {
            return Ok(());
        }
        let Some(expected) = self.token.as_deref() else {
            return Err(GatewayError::AuthMisconfigured);
        };
        let provided = headers.get(AUTH_HEADER).and_then(|value| value.to_str().ok());
        if provided == Some(expected) {
            Ok(())
        } else {
            Err(GatewayError::Unauthorized)
        }
    }
}

/// Middleware enforcing the shared-secret check on guarded routes.
pub async fn require_shared_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.auth.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            if matches!(err, GatewayError::AuthMisconfigured) {
                tracing::error!("authentication required but no shared secret configured");
            }
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_key(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(parsed) = value.parse() {
            headers.insert(AUTH_HEADER, parsed);
        }
        headers
    }

    #[test]
    fn disabled_auth_admits_everything() {
        let auth = AuthSettings {
            required: false,
            token: None,
        };
        assert!(auth.check(&HeaderMap::new()).is_ok());
    }

    #[test]
    fn matching_secret_is_admitted() {
        let auth = AuthSettings {
            required: true,
            token: Some("s3cret".to_string()),
        };
        assert!(auth.check(&headers_with_key("s3cret")).is_ok());
    }

    #[test]
    fn wrong_or_missing_secret_is_unauthorized() {
        let auth = AuthSettings {
            required: true,
            token: Some("s3cret".to_string()),
        };
        assert!(matches!(
            auth.check(&headers_with_key("nope")),
            Err(GatewayError::Unauthorized)
        ));
        assert!(matches!(
            auth.check(&HeaderMap::new()),
            Err(GatewayError::Unauthorized)
        ));
    }

    #[test]
    fn required_without_secret_fails_closed() {
        let auth = AuthSettings {
            required: true,
            token: None,
        };
        // Even a client presenting a key must be refused with a server error.
        assert!(matches!(
            auth.check(&headers_with_key("anything")),
            Err(GatewayError::AuthMisconfigured)
        ));
    }
}
