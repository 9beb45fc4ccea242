use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    /// 非2xx响应，`message`是原始body
    #[error("http {status}: {message}")]
    RequestAPIFailed { status: StatusCode, message: String },
    /// 2xx响应但body不是期望的json
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
