use crate::utils::{lenient_bool, lenient_opt_string, lenient_string, lenient_u64};
use serde::Deserialize;

/// `GET /operation/{id}`返回的operation快照
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub server_id: Option<String>,
    #[serde(
        rename = "estimated_time_remaining",
        default,
        deserialize_with = "lenient_u64"
    )]
    pub estimated_time_remaining_minutes: u64,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub frontend_step_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub app_id: Option<String>,
}

const FAILURE_WORDS: [&str; 3] = ["failed", "failure", "error"];

fn is_failure_word(word: &str) -> bool {
    FAILURE_WORDS.iter().any(|w| word.eq_ignore_ascii_case(w))
}

impl OperationStatus {
    /// 服务端报告的失败状态
    ///
    /// `status`是自由文本（比如`Configuring error pages`），只按整词匹配：
    /// - 未完成时，首词或末词是`failed`/`failure`/`error`才算失败
    /// - 已完成时，只有整个`status`就是其中一个词才算失败
    pub fn is_failed(&self) -> bool {
        let mut words = self
            .status
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|w| !w.is_empty());
        let Some(first) = words.next() else {
            return false;
        };
        let last = words.next_back();

        if self.is_completed {
            return last.is_none() && is_failure_word(first);
        }
        is_failure_word(first) || last.is_some_and(is_failure_word)
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct OperationEnvelope {
    pub(crate) operation: OperationStatus,
}

/// 异步操作的初始响应里只关心`operation_id`
#[derive(Deserialize, Debug)]
pub(crate) struct OperationIdResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub(crate) operation_id: String,
}
