//! Time source used by token expiry checks and operation polling.
//!
//! 默认使用[`SystemClock`]；测试时可以注入[`ManualClock`]，`sleep`会立即返回并把时间往前拨，
//! 这样轮询和token过期都不需要真的等待。
//!
//! # Example
//! ```
//! use cw_sdk::clock::{Clock, ManualClock};
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let clock = ManualClock::new(time::OffsetDateTime::UNIX_EPOCH);
//! clock.sleep(Duration::from_secs(5)).await;
//! assert_eq!(clock.sleeps(), vec![Duration::from_secs(5)]);
//! # }
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use time::OffsetDateTime;

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait::async_trait]
impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(start),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += duration;
    }

    pub fn set(&self, instant: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// 到目前为止所有`sleep`调用的时长，按调用顺序
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(OffsetDateTime::now_utc())
    }
}

#[async_trait::async_trait]
impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        self.advance(duration);
    }
}
