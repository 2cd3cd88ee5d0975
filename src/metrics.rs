use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use medadmin_access::{DenyReason, LoadStatus};
use medadmin_config::LoggingConfig;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| LoggingConfig::from_env().observability_enabled)
}

/// Installs the Prometheus recorder and its upkeep task.
/// Returns `Ok(None)` if observability is disabled.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

pub fn track_login_success() {
    if !is_observability_enabled() {
        return;
    }
    counter!("console_logins_total", "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("console_logins_total", "status" => "failure", "reason" => reason).increment(1);
}

/// Outcome of a permission directory load (`ready` or `failed`).
pub fn track_permission_load(status: LoadStatus) {
    if !is_observability_enabled() {
        return;
    }
    counter!("permission_loads_total", "status" => status.as_str()).increment(1);
}

pub fn track_route_denied(reason: &DenyReason) {
    if !is_observability_enabled() {
        return;
    }
    let reason = match reason {
        DenyReason::MissingPermission(_) => "missing_permission",
        DenyReason::PermissionsPending => "permissions_pending",
        DenyReason::PermissionsUnavailable => "permissions_unavailable",
    };
    counter!("route_denials_total", "reason" => reason).increment(1);
}

pub fn track_session_expired() {
    if !is_observability_enabled() {
        return;
    }
    counter!("sessions_expired_total").increment(1);
}

pub fn set_active_sessions(count: usize) {
    if !is_observability_enabled() {
        return;
    }
    gauge!("console_sessions_active").set(count as f64);
}
