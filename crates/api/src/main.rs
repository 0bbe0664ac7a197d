use ledgerly_api::config::ApiConfig;

#[tokio::main]
async fn main() {
    ledgerly_observability::init();

    let config = ApiConfig::from_env();
    let port = config.port;

    let app = match ledgerly_api::app::build_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, port, "failed to bind listen port");
            std::process::exit(1);
        }
    };

    tracing::info!(port, "listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
