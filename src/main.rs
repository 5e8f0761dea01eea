use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use phishnet::{
    application::{
        ports::storage::KeyValueStore,
        use_cases::sync::{SnapshotView, spawn_external_sync},
    },
    infra::{
        InfraError,
        app::create_app,
        setup::{init_app_state, init_tracing},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let app_state = init_app_state().await?;

    let bind_addr = app_state.config.bind_addr;

    // Keep in-memory views in step with writes from other processes.
    let views: Vec<Arc<dyn SnapshotView>> =
        vec![app_state.key_store.clone(), app_state.history.clone()];
    spawn_external_sync(app_state.storage.subscribe(), views);

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    info!("Backend listening at {}", &listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(InfraError::Server)?;

    Ok(())
}
