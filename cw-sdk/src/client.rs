use crate::Error;
use crate::auth::TokenManager;
use crate::clock::{Clock, SystemClock};
use bon::bon;
use cw_sdk_common::helper::{join_url, parse_json_response};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const BASE_URL: &str = "https://api.cloudways.com/api/v1";

/// Cloudways API client.
///
/// 所有资源模块的请求都经过[`Client::call`]，它们共享同一个[`TokenManager`]。
/// `Client`可以廉价clone，clone之后仍然共享token缓存。
#[derive(Clone)]
pub struct Client {
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) tokens: Arc<TokenManager>,
    pub(crate) clock: Arc<dyn Clock>,
}

#[bon]
impl Client {
    /// `email`和`api_key`可以先不传，之后再调用[`Client::configure`]
    #[builder(on(String, into))]
    pub fn new(
        #[builder(default)] email: String,
        #[builder(default)] api_key: String,
        #[builder(default = BASE_URL.to_owned())] base_url: String,
        /// 单次http请求的超时时间
        timeout: Option<Duration>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Common(format!("build http client failed: {}", e)))?;

        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let tokens = Arc::new(TokenManager::new(
            http_client.clone(),
            base_url.clone(),
            clock.clone(),
        ));
        if !email.is_empty() || !api_key.is_empty() {
            tokens.configure(email, api_key);
        }

        Ok(Self {
            http_client,
            base_url,
            tokens,
            clock,
        })
    }

    pub fn configure(&self, email: impl Into<String>, api_key: impl Into<String>) {
        self.tokens.configure(email, api_key);
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 发送一次带token的请求，原样返回json
    ///
    /// - `path`: 相对`base_url`的路径，或者完整的url
    /// - `body`: `GET`请求作为query参数，其它方法作为json body
    ///
    /// 非2xx、网络错误、返回内容不是json都会返回[`Error::ApiCall`]，不会重试。
    pub async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let token = self.tokens.get_valid_token().await?;

        let url = join_url(&self.base_url, path).map_err(|e| Error::api_call(&method, path, e))?;
        // token来自换取接口，不能放进header说明换取结果不可用
        let mut auth_val = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            Error::Authentication(cw_sdk_common::Error::UnexpectedResponse(format!(
                "access token is not a valid header value: {}",
                e
            )))
        })?;
        auth_val.set_sensitive(true);

        let mut req = self
            .http_client
            .request(method.clone(), url)
            .header(AUTHORIZATION, auth_val);
        if let Some(body) = body {
            req = if method == Method::GET {
                req.query(body)
            } else {
                req.json(body)
            };
        }

        debug!(%method, path, "dispatching api call");
        let resp = req
            .send()
            .await
            .map_err(|e| Error::api_call(&method, path, e))?;

        parse_json_response(resp)
            .await
            .map_err(|e| Error::api_call(&method, path, e))
    }

    /// 同[`Client::call`]，并把响应反序列化为`T`
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<T, Error> {
        let value = self.call(path, method.clone(), body).await?;
        serde_json::from_value(value).map_err(|e| {
            Error::api_call(
                &method,
                path,
                cw_sdk_common::Error::UnexpectedResponse(e.to_string()),
            )
        })
    }
}
