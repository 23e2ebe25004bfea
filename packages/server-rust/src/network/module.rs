//! Network module with deferred startup lifecycle.
//!
//! `new()` allocates shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves. The
//! split lets the binary learn the bound port before serving.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{
    create_game, delete_game, head_to_head, health_handler, list_games, list_games_by_team,
    liveness_handler, patch_game, put_game, read_game, readiness_handler, AppState,
};
use super::middleware::{build_http_layers, track_in_flight};
use super::shutdown::ShutdownController;
use crate::service::GameRecordService;

/// How long `serve()` waits for in-flight requests after the shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the HTTP server lifecycle.
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    games: GameRecordService,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, games: GameRecordService) -> Self {
        Self {
            config,
            listener: None,
            games,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Shared handle to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /health`, `GET /health/live`, `GET /health/ready`
    /// - `GET|POST /v1/game`
    /// - `GET /v1/game/?teamName=T`
    /// - `GET /v1/game/head2head?teamName=A&teamName=B`
    /// - `GET|PUT|PATCH|DELETE /v1/game/{id}`
    pub fn build_router(&self) -> Router {
        router(
            AppState {
                games: self.games.clone(),
                shutdown: Arc::clone(&self.shutdown),
                config: Arc::new(self.config.clone()),
                start_time: Instant::now(),
            },
            &self.config,
        )
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 (OS-assigned) is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves, then drains.
    ///
    /// On the shutdown signal the health state moves to `Draining`, axum
    /// stops accepting connections and finishes open ones, and the module
    /// waits up to 30 seconds for in-flight requests before reporting
    /// `Stopped`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server
    /// hits a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let Self {
            listener,
            shutdown: shutdown_ctrl,
            ..
        } = self;
        let listener =
            listener.ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;

        shutdown_ctrl.set_ready();
        info!("Serving game API on {}", listener.local_addr()?);

        let signal_ctrl = Arc::clone(&shutdown_ctrl);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown signal received, draining");
                signal_ctrl.trigger_shutdown();
            })
            .await?;

        if shutdown_ctrl.wait_for_drain(DRAIN_TIMEOUT).await {
            info!("All requests drained");
        } else {
            warn!("Drain timeout expired with in-flight requests remaining");
        }
        Ok(())
    }
}

fn router(state: AppState, config: &NetworkConfig) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/v1/game", get(list_games).post(create_game))
        .route("/v1/game/", get(list_games_by_team))
        .route("/v1/game/head2head", get(head_to_head))
        .route(
            "/v1/game/{id}",
            get(read_game)
                .put(put_game)
                .patch(patch_game)
                .delete(delete_game),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            track_in_flight,
        ))
        .layer(build_http_layers(config))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;
    use crate::network::HealthState;
    use crate::storage::engines::HashMapRecordStore;

    fn module() -> NetworkModule {
        NetworkModule::new(
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                ..NetworkConfig::default()
            },
            GameRecordService::new(Arc::new(HashMapRecordStore::new())),
        )
    }

    #[test]
    fn new_creates_module_without_binding() {
        assert!(module().listener.is_none());
    }

    #[test]
    fn shutdown_controller_returns_shared_arc() {
        let module = module();
        assert!(Arc::ptr_eq(
            &module.shutdown_controller(),
            &module.shutdown_controller()
        ));
    }

    #[tokio::test]
    async fn start_binds_to_os_assigned_port() {
        let mut module = module();
        let port = module.start().await.unwrap();
        assert!(port > 0, "OS-assigned port should be > 0");
        assert!(module.listener.is_some());
    }

    #[tokio::test]
    async fn serve_without_start_is_an_error() {
        let err = module()
            .serve(std::future::pending::<()>())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("start()"));
    }

    #[tokio::test]
    async fn serves_until_shutdown_then_stops() {
        let mut module = module();
        let port = module.start().await.unwrap();
        let ctrl = module.shutdown_controller();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(module.serve(async {
            let _ = rx.await;
        }));

        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        stream
            .write_all(b"GET /health/ready HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
        assert!(response.to_ascii_lowercase().contains("x-request-id"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
        assert_eq!(ctrl.health_state(), HealthState::Stopped);
    }
}
