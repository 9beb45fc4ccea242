//! Bearer token lifecycle.
//!
//! [`TokenManager`]持有凭证和当前的access token，`get_valid_token`在token不存在或者过期时
//! 通过`POST /oauth/access_token`换取新的token，其余情况直接返回缓存。
//!
//! 同一时刻只有一个token有效。token过期时并发调用`get_valid_token`会在`refresh_lock`上排队，
//! 拿到锁后重新检查缓存，所以只会发出一次换取请求。

mod types;
pub use types::*;

use crate::Error;
use crate::clock::Clock;
use cw_sdk_common::helper::{join_url, parse_json_response};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

const TOKEN_PATH: &str = "/oauth/access_token";

#[derive(Default)]
struct State {
    credentials: Option<Credentials>,
    token: Option<AuthToken>,
    // 每次换成新的凭证就+1，旧凭证发起的刷新不能写回缓存
    generation: u64,
}

pub struct TokenManager {
    http_client: reqwest::Client,
    base_url: String,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
    refresh_lock: tokio::sync::Mutex<()>,
}

enum Lookup {
    Cached(String),
    Refresh(Credentials, u64),
}

impl TokenManager {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            clock,
            state: Mutex::new(State::default()),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 设置凭证
    ///
    /// 凭证和当前相同时什么也不做，不同则丢弃已缓存的token，之后的调用一定使用新凭证换取token。
    pub fn configure(&self, email: impl Into<String>, api_key: impl Into<String>) {
        let creds = Credentials::new(email, api_key);
        let mut state = self.state();
        if state.credentials.as_ref() == Some(&creds) {
            return;
        }

        debug!(email = %creds.email, "credentials replaced, cached token dropped");
        state.credentials = Some(creds);
        state.token = None;
        state.generation += 1;
    }

    pub fn is_configured(&self) -> bool {
        self.state().credentials.is_some()
    }

    /// 丢弃缓存的token，下一次调用会重新换取
    pub fn invalidate(&self) {
        self.state().token = None;
    }

    /// 当前缓存的token，不做过期检查
    pub fn cached_token(&self) -> Option<AuthToken> {
        self.state().token.clone()
    }

    fn lookup(&self) -> Result<Lookup, Error> {
        let state = self.state();
        let Some(creds) = state.credentials.as_ref() else {
            return Err(Error::Configuration(
                "library not initialized, call configure first".to_owned(),
            ));
        };
        if !creds.is_complete() {
            return Err(Error::Configuration(
                "incomplete credentials: email and api_key are required".to_owned(),
            ));
        }

        match &state.token {
            Some(token) if token.is_valid_at(self.clock.now()) => {
                Ok(Lookup::Cached(token.value().to_owned()))
            }
            _ => Ok(Lookup::Refresh(creds.clone(), state.generation)),
        }
    }

    pub async fn get_valid_token(&self) -> Result<String, Error> {
        if let Lookup::Cached(token) = self.lookup()? {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;
        // 排队期间别的调用可能已经刷新过了
        let (creds, generation) = match self.lookup()? {
            Lookup::Cached(token) => return Ok(token),
            Lookup::Refresh(creds, generation) => (creds, generation),
        };

        let token = self.exchange(&creds).await?;
        let value = token.value().to_owned();

        let mut state = self.state();
        if state.generation == generation {
            state.token = Some(token);
        } else {
            debug!("credentials changed during refresh, token not cached");
        }

        Ok(value)
    }

    async fn exchange(&self, creds: &Credentials) -> Result<AuthToken, Error> {
        let url = join_url(&self.base_url, TOKEN_PATH).map_err(Error::Authentication)?;
        let resp = self
            .http_client
            .post(url)
            .json(creds)
            .send()
            .await
            .map_err(|e| Error::Authentication(e.into()))?;

        let resp: AccessTokenResponse = parse_json_response(resp)
            .await
            .map_err(Error::Authentication)?;
        let token = AuthToken::from_response(resp, self.clock.now());
        info!(expires_at = %token.expires_at(), "access token refreshed");

        Ok(token)
    }
}
