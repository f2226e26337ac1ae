//! Request shapes accepted by the token service

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenData;

/// Parameters for issuing a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateToken {
    pub app: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub owner: String,
    /// Payload to store, empty when absent
    #[serde(default)]
    pub data: Option<TokenData>,
    /// Caller-chosen token value; a random one is generated when absent
    #[serde(default, rename = "customToken")]
    pub custom_token: Option<String>,
    /// Lifetime in seconds; the token persists when absent
    #[serde(default)]
    pub duration: Option<u64>,
}

impl CreateToken {
    pub fn new(
        app: impl Into<String>,
        token_type: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            token_type: token_type.into(),
            owner: owner.into(),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: TokenData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_custom_token(mut self, token: impl Into<String>) -> Self {
        self.custom_token = Some(token.into());
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// Identifies a single token regardless of its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLookup {
    pub app: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub token: String,
}

impl TokenLookup {
    pub fn new(
        app: impl Into<String>,
        token_type: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            token_type: token_type.into(),
            token: token.into(),
        }
    }
}

/// Parameters for reading a token
pub type GetToken = TokenLookup;

/// Parameters for deleting a token
pub type DeleteToken = TokenLookup;

/// Parameters for extending a token's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub app: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub token: String,
    /// New lifetime in seconds, counted from now
    pub duration: u64,
}

impl RefreshToken {
    pub fn new(lookup: TokenLookup, duration: u64) -> Self {
        Self {
            app: lookup.app,
            token_type: lookup.token_type,
            token: lookup.token,
            duration,
        }
    }
}

/// Parameters for patching a token's payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateToken {
    pub app: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub token: String,
    /// Patch merged into the stored payload; `null` values remove keys
    pub data: TokenData,
}

impl UpdateToken {
    pub fn new(lookup: TokenLookup, data: TokenData) -> Self {
        Self {
            app: lookup.app,
            token_type: lookup.token_type,
            token: lookup.token,
            data,
        }
    }
}

/// Parameters for deleting every token of one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAllTokens {
    pub app: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub owner: String,
}

impl DeleteAllTokens {
    pub fn new(
        app: impl Into<String>,
        token_type: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            token_type: token_type.into(),
            owner: owner.into(),
        }
    }
}
