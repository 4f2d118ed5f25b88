//! Start-up context capture.
//!
//! The campaign a user arrived from comes either from an explicit flag or
//! from the `utm_campaign` query parameter of the link that launched the
//! client. It is read once and handed to the controller as a value.

use reqwest::Url;
use thiserror::Error;

use parley_types::launch::LaunchContext;

const CAMPAIGN_PARAM: &str = "utm_campaign";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid launch URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Build the launch context. An explicit campaign wins over the URL.
pub fn capture_launch_context(
    campaign: Option<&str>,
    launch_url: Option<&str>,
) -> Result<LaunchContext, LaunchError> {
    if let Some(campaign) = campaign {
        return Ok(LaunchContext::with_campaign(campaign));
    }

    let Some(raw) = launch_url else {
        return Ok(LaunchContext::default());
    };

    let url = Url::parse(raw).map_err(|e| LaunchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    let campaign = url
        .query_pairs()
        .find(|(key, _)| key == CAMPAIGN_PARAM)
        .map(|(_, value)| value.into_owned());

    Ok(campaign
        .map(LaunchContext::with_campaign)
        .unwrap_or_default())
}
