//! API server entry point.

use api::AppInfo;
use common::ListenConfig;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing and load configuration
    common::telemetry::init_tracing("info");
    let config = ListenConfig::from_env(api::DEFAULT_PORT);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = common::telemetry::install_metrics_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the application
    let info = AppInfo::default();
    tracing::info!(title = %info.title, version = %info.version, "building application");
    let app = api::create_app(info, metrics_handle);

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, log_level = %config.log_level, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
