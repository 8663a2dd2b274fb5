use std::sync::Arc;

use marketing_chat::{config::Config, init_tracing, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("marketing_chat=info,tower_http=info");

    let config = Config::from_env()?;
    if !config.api_key_present() {
        tracing::warn!("OPENAI_API_KEY is not set; every chat reply will be the fallback message");
    }
    tracing::info!(model = %config.model, base_url = %config.base_url, "completion provider configured");

    let state = Arc::new(AppState::new(&config));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("marketing site running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
