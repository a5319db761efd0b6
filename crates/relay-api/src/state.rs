use std::time::Duration;

use crate::{
    ApiConfig, config::Environment, oauth::google::GoogleOAuthClient, settings::SettingsClient,
};

#[derive(Clone)]
pub struct ApiState {
    pub google: GoogleOAuthClient,
    pub settings: SettingsClient,
    pub state_secret: String,
    pub state_expiry_minutes: i64,
    pub success_redirect: String,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        // One pooled client for both upstreams, bounded so a hung provider
        // or settings store cannot hold a callback open forever
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let google = GoogleOAuthClient::new(&config, http_client.clone())?;
        let settings = SettingsClient::new(
            &config.settings_api_url,
            config.settings_api_key,
            http_client,
        )?;

        Ok(Self {
            google,
            settings,
            state_secret: config.state_secret,
            state_expiry_minutes: config.state_expiry_minutes,
            success_redirect: config.success_redirect,
            environment: config.env,
        })
    }
}
