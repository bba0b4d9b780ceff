//! Laundry Closet Back binary entrypoint wiring the closet REST API, SSE, and storage supervision.

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use laundry_closet_back::{
    build_router,
    config::AppConfig,
    dao::{
        garment_store::{GarmentStore, local::LocalGarmentStore},
        storage::StorageError,
    },
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let data_file = config.data_file().to_path_buf();
    let app_state = AppState::new(config);

    spawn_storage_supervisor(app_state.clone(), data_file);
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Start supervising CouchDB when `COUCH_BASE_URL` is set, else the local snapshot file.
fn spawn_storage_supervisor(state: SharedState, data_file: PathBuf) {
    #[cfg(feature = "couch-store")]
    {
        use laundry_closet_back::dao::garment_store::couchdb::{CouchConfig, CouchGarmentStore};

        if let Ok(couch_config) = CouchConfig::from_env() {
            info!(
                base_url = %couch_config.base_url,
                database = %couch_config.database,
                "using CouchDB garment store"
            );
            tokio::spawn(storage_supervisor::run(state, move || {
                let config = couch_config.clone();
                async move {
                    let store = CouchGarmentStore::connect(config).await?;
                    Ok::<_, StorageError>(Arc::new(store) as Arc<dyn GarmentStore>)
                }
            }));
            return;
        }
    }

    info!(path = %data_file.display(), "using local garment store");
    tokio::spawn(storage_supervisor::run(state, move || {
        let path = data_file.clone();
        async move {
            let store = LocalGarmentStore::open(path).await?;
            store.try_reconnect().await?;
            Ok::<_, StorageError>(Arc::new(store) as Arc<dyn GarmentStore>)
        }
    }));
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
