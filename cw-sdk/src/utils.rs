//! 接口返回的数字和布尔值有时是json数字/布尔，有时是字符串（比如`"1"`、`"0"`、`"true"`），
//! 这里的反序列化函数两种都接受，`null`和缺失按默认值处理。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                Ok(u)
            } else if let Some(f) = n.as_f64() {
                // 负数按0处理
                Ok(if f > 0.0 { f.ceil() as u64 } else { 0 })
            } else {
                Ok(0)
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            if let Ok(u) = s.parse::<u64>() {
                return Ok(u);
            }
            s.parse::<f64>()
                .map(|f| if f > 0.0 { f.ceil() as u64 } else { 0 })
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s)))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected number, got {}",
            other
        ))),
    }
}

pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    match v {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "" | "0" | "false" | "no" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid bool: {}", other))),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected bool, got {}",
            other
        ))),
    }
}

/// 列表等字段可能是`null`，按默认值处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn to_body<T: serde::Serialize>(req: &T) -> Result<Value, crate::Error> {
    serde_json::to_value(req)
        .map_err(|e| crate::Error::Common(format!("serialize request failed: {}", e)))
}

/// 资源模块在发请求之前做的简单校验
pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), crate::Error> {
    if value.trim().is_empty() {
        return Err(crate::Error::Common(format!("{} cannot be empty", name)));
    }
    Ok(())
}
