use crate::errors::{DeribitError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Scope string sent with every auth request, as the venue console expects
pub const AUTH_SCOPE: &str = "session:apiconsole-c5i26ds6dsr expires:2592000";

/// API credentials, supplied at startup and immutable for the process
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}

/// Authenticated session. Created exactly once by a successful
/// `public/auth` call; no refresh or expiry tracking — if the venue-side
/// token lifetime elapses, private calls start failing with ordinary
/// venue errors.
#[derive(Clone, Debug)]
pub struct Session {
    pub access_token: String,
    pub obtained_at: DateTime<Utc>,
}

impl Session {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            obtained_at: Utc::now(),
        }
    }
}

/// Params for the `public/auth` credential exchange
pub fn auth_params(credentials: &Credentials) -> Value {
    serde_json::json!({
        "grant_type": "client_credentials",
        "scope": AUTH_SCOPE,
        "client_id": credentials.client_id,
        "client_secret": credentials.client_secret,
    })
}

/// Pull the access token out of a successful auth `result` payload.
/// A result without one is an auth failure, not a crash.
pub fn extract_access_token(result: &Value) -> Result<String> {
    result
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            DeribitError::AuthError("Auth response carried no access_token".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_params_shape() {
        let credentials = Credentials::new("yW37rgCX".to_string(), "secret".to_string());
        let params = auth_params(&credentials);

        assert_eq!(params["grant_type"], "client_credentials");
        assert_eq!(params["scope"], AUTH_SCOPE);
        assert_eq!(params["client_id"], "yW37rgCX");
        assert_eq!(params["client_secret"], "secret");
    }

    #[test]
    fn test_extract_access_token() {
        let result = serde_json::json!({"access_token": "abc123", "expires_in": 2592000});
        assert_eq!(extract_access_token(&result).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_access_token_missing() {
        let result = serde_json::json!({"expires_in": 2592000});
        let err = extract_access_token(&result).unwrap_err();
        assert!(matches!(err, DeribitError::AuthError(_)));
    }

    #[test]
    fn test_extract_access_token_wrong_type() {
        let result = serde_json::json!({"access_token": 42});
        assert!(extract_access_token(&result).is_err());
    }
}
