//! Example: calling the Glide APIs from the command line
//!
//! Reads credentials from the environment (or a `.env` file) and runs a
//! telco lookup followed by a SIM swap check for one number.
//!
//! # Setup
//!
//! ```bash
//! export GLIDE_CLIENT_ID=...
//! export GLIDE_CLIENT_SECRET=...
//! export GLIDE_LOG_LEVEL=info
//! cargo run -p glide-infra --example glide_demo -- +15551234567
//! ```

use std::time::Duration;

use anyhow::Context;
use glide_common::PollConfig;
use glide_domain::{ApiConfig, Settings, SimSwapCheckParams, UserIdentifier};
use glide_infra::{init_tracing, load_settings_from_env, GlideClient};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let defaults = load_settings_from_env().context("failed to read GLIDE_* environment")?;
    init_tracing(defaults.internal.log_level);

    let phone = std::env::args().nth(1).unwrap_or_else(|| "+15551234567".to_string());
    let glide = GlideClient::new(Settings::default()).context("failed to create Glide client")?;
    let conf = ApiConfig::new().with_session_identifier(uuid::Uuid::new_v4().to_string());

    match glide.telco_finder().lookup_number(&phone, &conf).await {
        Ok(found) => info!(
            subject = %found.subject,
            operator = %found.properties.operator_id,
            "telco lookup complete"
        ),
        Err(err) => warn!(error = %err, "telco lookup failed"),
    }

    let user = glide.sim_swap().for_user(UserIdentifier::phone(&phone)).await.context("SIM swap session")?;
    if let Some(url) = user.consent_url() {
        info!(%url, "end user must grant consent before the check can run");
        let cancel = CancellationToken::new();
        let poll = PollConfig { timeout: Duration::from_secs(120), ..PollConfig::default() };
        user.poll_and_wait_for_session(&poll, &cancel).await.context("waiting for consent")?;
    }

    let params = SimSwapCheckParams { max_age: Some(24), ..SimSwapCheckParams::default() };
    let result = user.check(&params, &conf).await.context("SIM swap check")?;
    info!(swapped = result.swapped, "SIM swap check complete");

    Ok(())
}
