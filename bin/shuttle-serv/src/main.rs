use relay_api::{config::ApiConfig, state::ApiState};

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    // Load configuration from Shuttle secrets
    let config = ApiConfig::from_shuttle_secrets(&secrets)
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // Note: Shuttle already initializes tracing, so we skip our custom init

    let metrics_handle = relay_api::metrics::init_metrics()?;
    let state = ApiState::new(config.clone())?;

    tracing::info!("Environment: {:?}", config.env);

    Ok(relay_api::router::app(state, metrics_handle).into())
}
