//! Polling of provider-side asynchronous operations.
//!
//! 创建服务器、重启、备份等操作在服务端是异步执行的，接口只返回一个`operation_id`，
//! 需要不断请求`GET /operation/{id}`直到`is_completed`为true。
//!
//! 两次请求之间的等待时间：
//! - 服务端给出`estimated_time_remaining`（分钟）且大于0时，等待这么多分钟
//! - 否则等待`fallback_interval`，默认5秒
//!
//! 服务端报告失败（见[`OperationStatus::is_failed`]）时立即返回[`Error::OperationFailed`]，
//! 设置了`timeout`时超时返回[`Error::OperationTimeout`]，没有设置则一直轮询。

mod types;
pub use types::*;

use crate::{Client, Error};
use bon::Builder;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_FALLBACK_INTERVAL: Duration = Duration::from_millis(5_000);

#[derive(Builder)]
pub struct AwaitOperation<'a> {
    #[builder(start_fn)]
    client: &'a Client,
    #[builder(start_fn)]
    operation_id: &'a str,
    /// 整体超时，不设置则不限制
    timeout: Option<Duration>,
    #[builder(default = DEFAULT_FALLBACK_INTERVAL)]
    fallback_interval: Duration,
}

/// 下一次轮询前的等待时间
pub fn next_delay(status: &OperationStatus, fallback: Duration) -> Duration {
    if status.estimated_time_remaining_minutes > 0 {
        Duration::from_secs(status.estimated_time_remaining_minutes.saturating_mul(60))
    } else {
        fallback
    }
}

impl Client {
    pub fn await_operation<'a>(&'a self, operation_id: &'a str) -> AwaitOperationBuilder<'a> {
        AwaitOperation::builder(self, operation_id)
    }

    /// 使用默认参数轮询，直到operation完成
    pub async fn await_completion(&self, operation_id: &str) -> Result<OperationStatus, Error> {
        self.await_operation(operation_id).build().send().await
    }

    /// 获取一次operation状态
    pub async fn get_operation_status(&self, operation_id: &str) -> Result<OperationStatus, Error> {
        let path = format!("/operation/{}", operation_id);
        let env: OperationEnvelope = self.call_json(&path, Method::GET, None).await?;
        Ok(env.operation)
    }

    /// 发起一个异步操作并等待完成，返回初始响应和最终的operation状态
    pub(crate) async fn call_and_wait(
        &self,
        path: &str,
        method: Method,
        body: Option<&serde_json::Value>,
    ) -> Result<(serde_json::Value, OperationStatus), Error> {
        let value = self.call(path, method.clone(), body).await?;
        let started = OperationIdResponse::deserialize(&value).map_err(|e| {
            Error::api_call(
                &method,
                path,
                cw_sdk_common::Error::UnexpectedResponse(format!("missing operation_id: {}", e)),
            )
        })?;
        debug!(path, operation_id = %started.operation_id, "operation started");

        let status = self.await_completion(&started.operation_id).await?;
        Ok((value, status))
    }
}

impl AwaitOperation<'_> {
    pub async fn send(&self) -> Result<OperationStatus, Error> {
        let client = self.client;
        if self.operation_id.trim().is_empty() {
            return Err(Error::Common("operation_id cannot be empty".to_owned()));
        }

        let started = client.clock.now();
        let mut polls = 0_u32;
        loop {
            let status = client.get_operation_status(self.operation_id).await?;
            polls += 1;
            debug!(
                operation_id = self.operation_id,
                polls,
                status = %status.status,
                is_completed = status.is_completed,
                "operation status"
            );

            if status.is_failed() {
                warn!(operation_id = self.operation_id, message = %status.message, "operation failed");
                return Err(Error::OperationFailed {
                    id: self.operation_id.to_owned(),
                    status: status.status,
                    message: status.message,
                });
            }
            if status.is_completed {
                info!(operation_id = self.operation_id, polls, "operation completed");
                return Ok(status);
            }

            let mut delay = next_delay(&status, self.fallback_interval);
            if let Some(limit) = self.timeout {
                let elapsed: Duration = (client.clock.now() - started)
                    .try_into()
                    .unwrap_or(Duration::ZERO);
                if elapsed >= limit {
                    warn!(operation_id = self.operation_id, ?elapsed, "operation poll timed out");
                    return Err(Error::OperationTimeout {
                        id: self.operation_id.to_owned(),
                        elapsed,
                    });
                }
                delay = delay.min(limit - elapsed);
            }

            client.clock.sleep(delay).await;
        }
    }
}
