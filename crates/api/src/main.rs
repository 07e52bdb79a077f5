use std::env;

use anyhow::Result;
use yatri_api::build_app;
use yatri_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatri_api");

    let kb_root = env::var("YATRI_KB_ROOT").ok();
    let bind = env::var("YATRI_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = build_app(kb_root.as_deref())?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(
        bind = %bind,
        kb_root = %kb_root.as_deref().unwrap_or("builtin"),
        "yatri planning api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
