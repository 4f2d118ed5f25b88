//! Values captured once when the shell starts.

use serde::{Deserialize, Serialize};

/// Start-up context handed explicitly to whoever needs it.
///
/// Lives as long as the conversation it was created for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchContext {
    /// Marketing campaign the user arrived from (`utm_campaign`).
    pub campaign: Option<String>,
}

impl LaunchContext {
    pub fn with_campaign(campaign: impl Into<String>) -> Self {
        let campaign = campaign.into().trim().to_string();
        Self {
            campaign: (!campaign.is_empty()).then_some(campaign),
        }
    }

    /// Campaign label for log fields; `-` when absent.
    pub fn campaign_label(&self) -> &str {
        self.campaign.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_campaign_is_absent() {
        assert_eq!(LaunchContext::with_campaign("  ").campaign, None);
        assert_eq!(LaunchContext::default().campaign_label(), "-");
    }

    #[test]
    fn test_campaign_label() {
        let ctx = LaunchContext::with_campaign("spring_promo");
        assert_eq!(ctx.campaign_label(), "spring_promo");
    }
}
