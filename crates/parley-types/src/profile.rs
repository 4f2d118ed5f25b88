//! The one-time user profile submitted to open a conversation.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Age, hobby and free-text notes about the user.
///
/// Fields are private so every `Profile` in circulation has passed
/// validation: a positive age and a non-blank hobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    age: u32,
    hobby: String,
    other: String,
}

impl Profile {
    /// Build a validated profile. `hobby` and `other` are trimmed.
    pub fn new(
        age: u32,
        hobby: impl Into<String>,
        other: impl Into<String>,
    ) -> Result<Self, SessionError> {
        if age == 0 {
            return Err(SessionError::Validation(
                "age must be a positive integer".to_string(),
            ));
        }
        let hobby = hobby.into().trim().to_string();
        if hobby.is_empty() {
            return Err(SessionError::Validation("hobby is required".to_string()));
        }
        Ok(Self {
            age,
            hobby,
            other: other.into().trim().to_string(),
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn hobby(&self) -> &str {
        &self.hobby
    }

    pub fn other(&self) -> &str {
        &self.other
    }
}
