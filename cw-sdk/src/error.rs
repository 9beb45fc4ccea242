use reqwest::Method;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// 没有调用`configure`，或者凭证不完整
    #[error("configuration error: {0}")]
    Configuration(String),
    /// 换取access token失败
    #[error("authentication failed: {0}")]
    Authentication(#[source] cw_sdk_common::Error),
    #[error("api call {method} {endpoint} failed: {source}")]
    ApiCall {
        method: Method,
        endpoint: String,
        #[source]
        source: cw_sdk_common::Error,
    },
    /// 服务端报告operation失败
    #[error("operation {id} failed: {status}, message: {message}")]
    OperationFailed {
        id: String,
        status: String,
        message: String,
    },
    #[error("operation {id} not completed after {elapsed:?}")]
    OperationTimeout { id: String, elapsed: Duration },
    #[error("error: {0}")]
    Common(String),
}

impl Error {
    pub(crate) fn api_call(
        method: &Method,
        endpoint: impl Into<String>,
        source: impl Into<cw_sdk_common::Error>,
    ) -> Self {
        Error::ApiCall {
            method: method.clone(),
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }
}
