use relay_api::{config::ApiConfig, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    relay_api::tracing::init_tracing(&config.env);

    let metrics_handle = relay_api::metrics::init_metrics()?;
    let state = ApiState::new(config.clone())?;

    let app = relay_api::router::app(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, env = ?config.env, "OAuth relay listening");
    axum::serve(listener, app).await?;

    Ok(())
}
