//! Application startup and lifecycle management.

use crate::config::{ProductConfig, StorageBackend};
use crate::services::{InMemoryProductStore, MongoProductStore, ProductDb, ProductStore};
use crate::{build_router, AppState};
use axum::Router;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    db: Option<ProductDb>,
}

impl Application {
    /// Connects storage, builds the router and binds the listener.
    /// Port 0 picks a free port, which tests rely on.
    pub async fn build(config: ProductConfig) -> Result<Self, AppError> {
        let (store, db): (Arc<dyn ProductStore>, Option<ProductDb>) = match config.storage {
            StorageBackend::Mongodb => {
                let db = ProductDb::connect(&config.mongodb.uri, &config.mongodb.database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;
                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                (Arc::new(MongoProductStore::new(db.clone())), Some(db))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory product store; data is lost on restart");
                (Arc::new(InMemoryProductStore::new()), None)
            }
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config: config.clone(),
            store,
        };
        let router = build_router(state);

        tracing::info!(port, service = %config.service_name, "Listening");

        Ok(Self {
            port,
            listener,
            router,
            db,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The MongoDB handle, when that backend is in use.
    pub fn db(&self) -> Option<&ProductDb> {
        self.db.as_ref()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
