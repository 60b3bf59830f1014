//! StormGlass error types

use thiserror::Error;

/// Errors returned by [`crate::StormGlassClient`]
///
/// Both variants carry only a preformatted message; the variant tells
/// whether the provider answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StormGlassError {
    /// The request did not reach the provider or no response came back
    #[error("Erro inesperado ao tentar acesso o StormGlass: {0}")]
    ClientRequest(String),

    /// The provider answered with an error status and a body
    #[error("Unexpected error returned by the StormGlass service: {0}")]
    ProviderResponse(String),
}

impl StormGlassError {
    /// Build a provider error from the response body and HTTP status
    ///
    /// The body is printed as compact JSON in its received key order, with
    /// integral numbers written without a fraction (`1.0` prints as `1`).
    #[must_use]
    pub fn provider_response(body: &serde_json::Value, status: u16) -> Self {
        let body = integral_numbers(body);
        Self::ProviderResponse(format!("Error: {body} Code: {status}"))
    }

    /// Classify a failed transport call
    ///
    /// A response with a non-empty body makes it a provider error, anything
    /// else is a client request error carrying the transport message.
    #[must_use]
    pub fn from_http(error: HttpError) -> Self {
        match error.response {
            Some(response) if response.has_body() => {
                Self::provider_response(&response.body, response.status)
            },
            _ => Self::ClientRequest(error.message),
        }
    }

    /// Full human-readable message
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the provider itself answered with the error
    #[must_use]
    pub const fn is_provider_response(&self) -> bool {
        matches!(self, Self::ProviderResponse(_))
    }
}

/// Rewrite floats with no fractional part as integers
#[allow(clippy::cast_possible_truncation)]
fn integral_numbers(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(v) if v.fract() == 0.0 && v.abs() < 9.0e18 => {
                serde_json::Value::from(v as i64)
            },
            _ => value.clone(),
        },
        serde_json::Value::Array(items) => items.iter().map(integral_numbers).collect(),
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), integral_numbers(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

impl From<HttpError> for StormGlassError {
    fn from(error: HttpError) -> Self {
        Self::from_http(error)
    }
}

/// Failure reported by an [`crate::HttpClient`]
///
/// Covers both transport faults and non-2xx answers; the latter carry the
/// remote status and body in `response`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Description of the failure
    pub message: String,
    /// Remote answer, when the server responded
    pub response: Option<HttpErrorResponse>,
}

impl HttpError {
    /// Failure without any response from the remote side
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// Failure carrying the remote status code and body
    #[must_use]
    pub fn with_response(
        message: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> Self {
        Self {
            message: message.into(),
            response: Some(HttpErrorResponse { status, body }),
        }
    }
}

/// Status and body of an error response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, as JSON when it parsed, otherwise as a JSON string
    pub body: serde_json::Value,
}

impl HttpErrorResponse {
    /// Returns false for `null`, `false`, `0` and empty-string bodies
    #[must_use]
    pub fn has_body(&self) -> bool {
        match &self.body {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_message() {
        let err = StormGlassError::from_http(HttpError::transport("Network Error"));
        assert_eq!(
            err.to_string(),
            "Erro inesperado ao tentar acesso o StormGlass: Network Error"
        );
        assert!(!err.is_provider_response());
    }

    #[test]
    fn test_provider_response_message() {
        let err = StormGlassError::from_http(HttpError::with_response(
            "Request failed with status code 429",
            429,
            serde_json::json!({ "errors": ["Rate Limit reached"] }),
        ));
        assert_eq!(
            err.message(),
            r#"Unexpected error returned by the StormGlass service: Error: {"errors":["Rate Limit reached"]} Code: 429"#
        );
        assert!(err.is_provider_response());
    }

    #[test]
    fn test_provider_body_keeps_key_order_and_integral_numbers() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"message":"bad","code":1.0,"details":{"z":2.50,"a":[3.0,-0.0]}}"#)
                .unwrap();
        let err = StormGlassError::provider_response(&body, 400);
        assert_eq!(
            err.to_string(),
            r#"Unexpected error returned by the StormGlass service: Error: {"message":"bad","code":1,"details":{"z":2.5,"a":[3,0]}} Code: 400"#
        );
    }

    #[test]
    fn test_string_body_is_quoted() {
        let err = StormGlassError::from(HttpError::with_response(
            "Request failed with status code 502",
            502,
            serde_json::Value::String("Bad Gateway".to_string()),
        ));
        assert_eq!(
            err.to_string(),
            r#"Unexpected error returned by the StormGlass service: Error: "Bad Gateway" Code: 502"#
        );
    }

    #[test]
    fn test_response_without_body_is_client_request() {
        let err = StormGlassError::from_http(HttpError::with_response(
            "Request failed with status code 500",
            500,
            serde_json::Value::Null,
        ));
        assert_eq!(
            err,
            StormGlassError::ClientRequest("Request failed with status code 500".to_string())
        );

        let err = StormGlassError::from_http(HttpError::with_response(
            "Request failed with status code 503",
            503,
            serde_json::Value::String(String::new()),
        ));
        assert!(!err.is_provider_response());
    }

    #[test]
    fn test_has_body() {
        let response = HttpErrorResponse {
            status: 400,
            body: serde_json::json!({}),
        };
        assert!(response.has_body());

        let response = HttpErrorResponse {
            status: 400,
            body: serde_json::json!([]),
        };
        assert!(response.has_body());

        let response = HttpErrorResponse {
            status: 400,
            body: serde_json::json!(0),
        };
        assert!(!response.has_body());
    }
}
