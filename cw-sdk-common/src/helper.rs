use crate::Error;
use url::Url;

/// 把一个非2xx的响应转换为`Error::RequestAPIFailed`，body读取失败时返回`Error::Reqwest`
pub async fn into_request_failed_error(resp: reqwest::Response) -> Error {
    let status = resp.status();
    let body = resp.text().await;
    match body {
        Ok(message) => Error::RequestAPIFailed {
            status,
            message,
        },
        Err(e) => Error::Reqwest(e),
    }
}

/// 解析json响应
///
/// 空body按`null`处理，所以`T = serde_json::Value`时得到`Value::Null`
pub async fn parse_json_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();

    if !status.is_success() {
        return Err(into_request_failed_error(resp).await);
    }

    let text = resp.text().await?;
    let text = if text.trim().is_empty() {
        "null"
    } else {
        text.as_str()
    };
    let data = serde_json::from_str(text).map_err(|e| {
        Error::UnexpectedResponse(format!("JSON parse error: {}, response text: {}", e, text))
    })?;
    Ok(data)
}

/// 拼接请求地址
///
/// `path`如果已经是`http://`或`https://`开头的完整地址则直接使用，
/// 否则拼接到`base_url`后面，中间只保留一个`/`
pub fn join_url(base_url: &str, path: &str) -> Result<Url, Error> {
    let full = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    Url::parse(&full).map_err(|e| Error::Common(format!("invalid url `{}`: {}", full, e)))
}
