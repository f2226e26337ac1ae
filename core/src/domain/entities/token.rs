//! Token entity stored under a composite app/type/owner/token key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::key;

/// Free-form payload attached to a token
pub type TokenData = Map<String, Value>;

/// An issued token record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Tenant application the token belongs to
    pub app: String,

    /// Functional class of the token (session, invite, reset, ...)
    #[serde(rename = "type")]
    pub token_type: String,

    /// Entity that owns the token
    pub owner: String,

    /// Payload stored as the record's value
    #[serde(default)]
    pub data: TokenData,

    /// Opaque secret value
    pub token: String,
}

impl Token {
    /// Creates a new token record
    pub fn new(
        app: impl Into<String>,
        token_type: impl Into<String>,
        owner: impl Into<String>,
        data: TokenData,
        token: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            token_type: token_type.into(),
            owner: owner.into(),
            data,
            token: token.into(),
        }
    }

    /// Composite store key addressing this record
    pub fn key(&self) -> String {
        key::token_key(&self.app, &self.token_type, &self.owner, &self.token)
    }

    /// Token value safe for logs
    pub fn masked(&self) -> String {
        mask_token(&self.token)
    }
}

/// Apply a patch to stored token data
///
/// A `null` value removes the key, any other value replaces it. Keys that
/// are not mentioned in `patch` are left untouched.
pub fn merge_data(current: &mut TokenData, patch: TokenData) {
    for (field, value) in patch {
        if value.is_null() {
            current.remove(&field);
        } else {
            current.insert(field, value);
        }
    }
}

/// Mask a token for logging (show only the last 4 characters)
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}
