pub mod bids;
pub mod tenders;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Literal fragment written ahead of every successful body when the legacy
/// wire format is enabled.
pub const STATUS_PREFIX: &str = "200 OK";

/// API error type. Rendered as a plain-text body holding the message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{} not found", resource),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // Check for typed NotFoundError first (no fragile string matching)
        if let Some(nf) = err.downcast_ref::<crate::db::NotFoundError>() {
            return Self::not_found(&nf.resource);
        }
        tracing::error!("Storage error: {:#}", err);
        Self::internal(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// JSON body extractor whose decode failures surface as 400 `ApiError`s.
/// The body is decoded whatever `Content-Type` the client sent.
pub struct ApiJson<T>(pub T);

#[async_trait::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| ApiError::bad_request(e.to_string()))
    }
}

/// Query string extractor whose decode failures surface as 400 `ApiError`s
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// First value of `key` in a decoded query string
pub fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Response helper: 200 with a JSON body, prefixed when the legacy format is on
pub fn ok_json<T: Serialize>(state: &AppState, item: &T) -> Result<Response, ApiError> {
    let json = serde_json::to_string(item).map_err(|e| ApiError::internal(e.to_string()))?;
    let body = if state.config.legacy_status_prefix {
        format!("{}{}", STATUS_PREFIX, json)
    } else {
        json
    };
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Response helper: 200 without a payload
pub fn ok_empty(state: &AppState) -> Response {
    if state.config.legacy_status_prefix {
        (StatusCode::OK, STATUS_PREFIX).into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

/// Liveness probe
pub async fn ping(State(state): State<Arc<AppState>>) -> Response {
    ok_empty(&state)
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_ping() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, "GET", "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "200 OK");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _) = test_app().await;
        let (status, _) = send(&app, "GET", "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ok_json_without_prefix() {
        let state = AppState {
            store: crate::db::memory_store().await,
            config: crate::config::Config {
                legacy_status_prefix: false,
                ..Default::default()
            },
        };
        let response = ok_json(&state, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"a":1}"#);
    }

    #[test]
    fn test_first_param() {
        let params = vec![
            ("status".to_string(), "CANCELED".to_string()),
            ("other".to_string(), "x".to_string()),
            ("status".to_string(), "CREATED".to_string()),
        ];
        assert_eq!(first_param(&params, "status"), Some("CANCELED"));
        assert_eq!(first_param(&params, "other"), Some("x"));
        assert_eq!(first_param(&params, "missing"), None);
    }

    #[test]
    fn test_not_found_error_maps_to_404() {
        let err: anyhow::Error = crate::db::NotFoundError::new("Bid", "b-1").into();
        let api: ApiError = err.into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Bid not found");
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let api: ApiError = anyhow::anyhow!("disk I/O error").into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "disk I/O error");
    }
}
