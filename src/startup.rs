use crate::config::Config;
use crate::error::AppError;
use crate::handlers;
use crate::services::UploadStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state. Immutable across requests; concurrent
/// generations never contend.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: Arc<UploadStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let uploads = Arc::new(
            UploadStore::new(&config.storage.uploads_dir)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize upload storage at {}: {}",
                        config.storage.uploads_dir,
                        e
                    );
                    e
                })?,
        );

        let state = AppState {
            config: config.clone(),
            uploads: uploads.clone(),
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/api/generate", post(handlers::generate_document))
            .route("/api/preview", post(handlers::preview_document))
            .route("/api/payment-qr", post(handlers::payment_qr))
            .route("/api/whatsapp-link", post(handlers::whatsapp_link))
            .nest_service("/uploads", ServeDir::new(uploads.base_path()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
