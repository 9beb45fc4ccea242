use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Duration, OffsetDateTime};

/// 提前多久认为token已过期，避免在token最后几秒还拿去请求
pub const EXPIRY_MARGIN_SECS: i64 = 300;

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"***")
            .finish()
    }
}

/// `POST /oauth/access_token`的响应
#[derive(Deserialize, Debug)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: i64,
}

/// Bearer token currently used for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    value: String,
    expires_at: OffsetDateTime,
}

impl AuthToken {
    pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// 过期时间 = 当前时间 + (expires_in - 300)秒
    pub fn from_response(resp: AccessTokenResponse, now: OffsetDateTime) -> Self {
        let lifetime = Duration::seconds(resp.expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        Self::new(resp.access_token, now.saturating_add(lifetime))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    pub fn expires_at_epoch_ms(&self) -> i128 {
        self.expires_at.unix_timestamp_nanos() / 1_000_000
    }

    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
