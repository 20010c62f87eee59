// API key check for the mock API
use crate::infrastructure::config::ApiKeySettings;
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use subtle::ConstantTimeEq;

pub const API_KEY_HEADER: &str = "x-api-key";

/// True when `provided` equals either configured key. Unset keys never match.
pub fn key_accepted(keys: &ApiKeySettings, provided: &str) -> bool {
    [&keys.read_key, &keys.write_key]
        .into_iter()
        .filter(|expected| !expected.is_empty())
        .any(|expected| bool::from(expected.as_bytes().ct_eq(provided.as_bytes())))
}

pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let accepted = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key_accepted(&state.api_keys, key));

    if accepted {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rejected API key for {}", request.uri().path());
        Err(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(read: &str, write: &str) -> ApiKeySettings {
        ApiKeySettings {
            read_key: read.to_string(),
            write_key: write.to_string(),
        }
    }

    #[test]
    fn test_either_key_accepted() {
        let keys = keys("reader", "writer");
        assert!(key_accepted(&keys, "reader"));
        assert!(key_accepted(&keys, "writer"));
        assert!(!key_accepted(&keys, "read"));
        assert!(!key_accepted(&keys, ""));
    }

    #[test]
    fn test_unset_key_never_matches() {
        let keys = keys("reader", "");
        assert!(!key_accepted(&keys, ""));
        assert!(key_accepted(&keys, "reader"));
    }
}
