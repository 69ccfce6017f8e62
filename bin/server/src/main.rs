use deployment_restarter_cluster::KubeCluster;
use deployment_restarter_server::{
    app,
    auth::{AppState, KeycloakProvider},
    config::ServerConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let cluster = KubeCluster::connect(config.kubeconfig_path.as_deref())
        .await
        .expect("failed to create kubernetes client");
    match cluster.server_version().await {
        Ok(version) => tracing::info!(server_version = %version, "Connected to kubernetes"),
        Err(e) => tracing::warn!(error = %e, "Failed to read kubernetes server version"),
    }

    let identity =
        KeycloakProvider::new(&config.oidc).expect("failed to configure identity provider");

    let app_state = Arc::new(AppState::new(&config, Arc::new(identity), Arc::new(cluster)));
    let app = app::router(app_state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
