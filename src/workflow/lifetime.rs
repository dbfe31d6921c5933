//! 流程生命周期
//!
//! 每个流程实例持有一个取消令牌，所有外部调用都与之竞争。
//! 令牌被取消（或流程被丢弃）后，未完成调用的结果直接丢弃，不再写回状态。

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Lifetime {
    token: CancellationToken,
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// 供外部持有的取消句柄
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 执行外部调用；已取消时返回 `None`
    pub async fn run<F: Future>(&self, call: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("流程已取消，丢弃未完成的调用");
                None
            }
            output = call => Some(output),
        }
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
