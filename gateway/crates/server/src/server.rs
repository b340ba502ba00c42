mod engine;
mod gateway;
mod state;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    routing::{get, post},
    Router,
};
use gateway_config::{Config, Environment};
use secrecy::SecretString;
use state::ServerState;
use tokio::{net::TcpListener, signal};

const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4000);

/// Start parameter for the gateway.
pub struct ServerConfig {
    /// The GraphQL endpoint listen address, over the one in the configuration.
    pub listen_addr: Option<SocketAddr>,
    /// The gateway configuration.
    pub config: Config,
    /// Overrides `upstream.environment`.
    pub environment: Option<Environment>,
    pub api_key: SecretString,
    pub api_secret: SecretString,
}

/// Starts the server and listens for incoming requests until a termination signal arrives.
///
/// Fails before binding if the credentials are missing or the upstream settings are unusable.
pub async fn serve(server_config: ServerConfig) -> crate::Result<()> {
    let addr = server_config
        .listen_addr
        .or(server_config.config.network.listen_address)
        .unwrap_or(DEFAULT_LISTEN_ADDRESS);

    let path = server_config.config.graph.path().to_string();
    let router = router(server_config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| crate::Error::Bind { addr, source })?;

    tracing::info!("GraphQL endpoint exposed at http://{addr}{path}");

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown())
        .await
        .map_err(crate::Error::Server)?;

    Ok(())
}

/// The routes of the gateway: `POST` on the graph path executes operations, `GET` serves
/// GraphiQL if the playground is enabled.
pub fn router(
    ServerConfig {
        config,
        environment,
        api_key,
        api_secret,
        ..
    }: ServerConfig,
) -> crate::Result<Router> {
    let environment = environment.unwrap_or(config.upstream.environment);
    let engine = gateway::generate(&config, environment, api_key, api_secret)?;

    tracing::debug!(%environment, "engine ready");

    let path = config.graph.path();
    let state = ServerState::new(engine, path.to_string());

    let route = if config.graph.playground {
        get(engine::playground).post(engine::execute)
    } else {
        post(engine::execute)
    };

    Ok(Router::new().route(path, route).with_state(state))
}

/// Waits for Ctrl+C or a Unix termination signal. Requests in flight are allowed to complete.
async fn graceful_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
