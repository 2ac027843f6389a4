//! Tool server entry point.

use std::time::Duration;

use common::ListenConfig;
use tool_server::McpServer;
use tool_server::session::SessionLimits;

/// Upper bound on how long an idle session outlives its timeout.
const MAX_REAPER_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    // 1. Initialize tracing and load configuration
    common::telemetry::init_tracing("info");
    let config = ListenConfig::from_env(tool_server::DEFAULT_PORT);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = common::telemetry::install_metrics_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Register tools and build the application
    let limits = SessionLimits::from_env();
    let server = McpServer::default().with_session_limits(limits);
    let reaper = server
        .sessions
        .spawn_reaper(limits.idle_timeout.min(MAX_REAPER_PERIOD));
    tracing::info!(
        max_sessions = limits.max_sessions,
        idle_timeout_secs = limits.idle_timeout.as_secs(),
        "session limits"
    );
    tracing::info!(
        name = %server.name,
        tools = ?server.registry.list(),
        "registered tools"
    );
    let app = tool_server::create_app(server, metrics_handle);

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, log_level = %config.log_level, "starting MCP tool server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown_signal())
        .await
        .expect("server error");

    reaper.abort();

    tracing::info!("server shut down gracefully");
}
