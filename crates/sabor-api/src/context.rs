//! Per-request caller context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the caller's correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Request metadata carried from the HTTP layer into command handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id from `x-correlation-id`, or a fresh one.
    pub correlation_id: Uuid,
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);
        Ok(Self { correlation_id })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn context_for(request: Request<()>) -> RequestContext {
        let (mut parts, ()) = request.into_parts();
        RequestContext::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_correlation_id_is_taken_from_header() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .header(CORRELATION_ID_HEADER, id.to_string())
            .body(())
            .unwrap();

        assert_eq!(context_for(request).await.correlation_id, id);
    }

    #[tokio::test]
    async fn test_malformed_header_gets_fresh_correlation_id() {
        let request = Request::builder()
            .header(CORRELATION_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();

        let context = context_for(request).await;

        assert_eq!(context.correlation_id.get_version_num(), 4);
    }
}
