use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::{ApiError, AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 64;

/// Coarse result of a request, used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Ok,
    /// 4xx: bad input, unknown user, failed login.
    Rejected,
    /// 5xx: storage or classifier failure.
    Failed,
}

impl RequestOutcome {
    #[must_use]
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Ok
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

/// `GET /api/metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .prometheus_handle
        .as_ref()
        .map(metrics_exporter_prometheus::PrometheusHandle::render)
        .ok_or_else(|| ApiError::NotFound("Metrics are disabled".to_string()))
}

/// Keeps a well-formed incoming `x-request-id`, otherwise mints a uuid.
fn request_id(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_string)
}

fn record_request(route: &str, method: &str, outcome: RequestOutcome, elapsed_secs: f64) {
    let labels = [
        ("route", route.to_string()),
        ("method", method.to_string()),
        ("outcome", outcome.as_str().to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed_secs);
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request_id(&req);
    let method = req.method().to_string();

    // Unmatched paths share one label so scanners cannot grow the series set.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    async move {
        let mut response = next.run(req).await;

        let status = response.status();
        let outcome = RequestOutcome::from_status(status);
        let elapsed = start.elapsed();
        record_request(&route, &method, outcome, elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if outcome == RequestOutcome::Failed {
            warn!(status = status.as_u16(), duration_ms, "Request failed");
        } else {
            info!(
                status = status.as_u16(),
                duration_ms,
                outcome = outcome.as_str(),
                "Request finished"
            );
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_id(id: &str) -> Request {
        Request::builder()
            .header("x-request-id", id)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_outcome_from_status() {
        assert_eq!(RequestOutcome::from_status(StatusCode::CREATED), RequestOutcome::Ok);
        assert_eq!(
            RequestOutcome::from_status(StatusCode::BAD_REQUEST),
            RequestOutcome::Rejected
        );
        assert_eq!(
            RequestOutcome::from_status(StatusCode::UNAUTHORIZED),
            RequestOutcome::Rejected
        );
        assert_eq!(
            RequestOutcome::from_status(StatusCode::SERVICE_UNAVAILABLE),
            RequestOutcome::Failed
        );
    }

    #[test]
    fn test_request_id_is_kept_when_well_formed() {
        assert_eq!(request_id(&request_with_id("client-42_a")), "client-42_a");
    }

    #[test]
    fn test_request_id_is_replaced_when_malformed() {
        let too_long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        for bad in ["", "has space", "semi;colon", too_long.as_str()] {
            let id = request_id(&request_with_id(bad));
            assert_ne!(id, bad);
            assert!(Uuid::parse_str(&id).is_ok());
        }

        let missing = Request::builder().body(Body::empty()).unwrap();
        assert!(Uuid::parse_str(&request_id(&missing)).is_ok());
    }
}
