//! Wire types for the `/api/prompt` endpoint.
//!
//! These mirror the backend's JSON exactly (camelCase keys, `firstPost`
//! discriminator). They are NOT the reply types from parley-types -- those
//! are independent of the encoding.

use serde::{Deserialize, Serialize};

use parley_types::chat::SessionId;
use parley_types::profile::Profile;

/// Request body for either call shape.
///
/// Serialized untagged: the `firstPost` flag inside each body tells the
/// backend which shape it received.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PromptRequest {
    Bootstrap(BootstrapBody),
    FollowUp(FollowUpBody),
}

impl PromptRequest {
    pub fn bootstrap(profile: &Profile) -> Self {
        PromptRequest::Bootstrap(BootstrapBody {
            first_post: true,
            age: profile.age(),
            hobby: profile.hobby().to_string(),
            other: profile.other().to_string(),
        })
    }

    pub fn follow_up(session_id: &SessionId, prompt: &str) -> Self {
        PromptRequest::FollowUp(FollowUpBody {
            first_post: false,
            prompt: prompt.to_string(),
            session_id: session_id.as_str().to_string(),
        })
    }

    /// Call shape label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PromptRequest::Bootstrap(_) => "bootstrap",
            PromptRequest::FollowUp(_) => "follow_up",
        }
    }
}

/// `{firstPost: true, age, hobby, other}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapBody {
    pub first_post: bool,
    pub age: u32,
    pub hobby: String,
    pub other: String,
}

/// `{firstPost: false, prompt, sessionId}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpBody {
    pub first_post: bool,
    pub prompt: String,
    pub session_id: String,
}

/// Success body for both call shapes. Only bootstrap replies carry
/// `sessionId`; unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bootstrap_body_shape() {
        let profile = Profile::new(30, "chess", "night owl").unwrap();
        let value = serde_json::to_value(PromptRequest::bootstrap(&profile)).unwrap();
        assert_eq!(
            value,
            json!({"firstPost": true, "age": 30, "hobby": "chess", "other": "night owl"})
        );
    }

    #[test]
    fn test_follow_up_body_shape() {
        let request = PromptRequest::follow_up(&SessionId::new("s-9"), "and then?");
        assert_eq!(request.kind(), "follow_up");
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(
            value,
            json!({"firstPost": false, "prompt": "and then?", "sessionId": "s-9"})
        );
    }

    #[test]
    fn test_response_without_session_id() {
        let resp: PromptResponse =
            serde_json::from_str(r#"{"message": "hi", "extra": 1}"#).unwrap();
        assert_eq!(resp.message, "hi");
        assert!(resp.session_id.is_none());
    }

    #[test]
    fn test_response_requires_message() {
        assert!(serde_json::from_str::<PromptResponse>(r#"{"sessionId": "x"}"#).is_err());
    }
}
