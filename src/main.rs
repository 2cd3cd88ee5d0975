use dotenvy::dotenv;
use medadmin::logging::init_tracing;
use medadmin::metrics::{init_metrics, metrics_app};
use medadmin::router::init_router;
use medadmin::state::init_app_state;
use medadmin_config::{LoggingConfig, ServerConfig};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let logging = LoggingConfig::from_env();
    if let Err(e) = init_tracing(&logging) {
        eprintln!("Failed to initialise logging in {}: {}", logging.log_dir, e);
        std::process::exit(1);
    }

    let state = init_app_state();
    info!(upstream = state.api.base_url(), "Marketplace API configured");
    state.sessions.spawn_sweeper(
        state.session_config.sweep_interval,
        state.session_config.idle_timeout,
    );

    let mut app = init_router(state);
    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_app(handle)),
        Ok(None) => info!("Observability disabled; /metrics not served"),
        Err(e) => warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let server = ServerConfig::from_env();
    let listener = match tokio::net::TcpListener::bind(server.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %server.bind_address(), error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!("Console gateway listening on http://{}", server.bind_address());
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
