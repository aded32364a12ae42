//! `paperdock web` - serve the JSON API and the bundled UI

use tracing::info;

use crate::{build_router, AppState};

/// Default port for the web UI
pub const DEFAULT_PORT: u16 = 5750;

/// Bind the loopback interface and serve until interrupted.
pub async fn run(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("paperdock web UI listening on http://{}", addr);
    println!("Serving on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
