//! 订阅者失败上报（FailureSink）
//!
//! 广播期间订阅者返回错误或 panic 时，错误被捕获并交给注入的上报端；
//! 未注入时回落到 `TracingSink`。上报是尽力而为的，不影响后续订阅者。
//!

/// 一次订阅者失败
#[derive(Debug)]
pub struct DispatchFailure<'a> {
    /// 事件名
    pub event: &'a str,
    /// 订阅者在序列中的位置
    pub position: usize,
    pub error: &'a anyhow::Error,
}

impl DispatchFailure<'_> {
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// 含错误链（及可用时的回溯）的详细描述
    pub fn trace(&self) -> String {
        format!("{:?}", self.error)
    }
}

/// 失败上报端
pub trait FailureSink: Send + Sync {
    fn report(&self, failure: &DispatchFailure<'_>);
}

/// 基于 `tracing` 的缺省上报端
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn report(&self, failure: &DispatchFailure<'_>) {
        tracing::error!(
            event = failure.event,
            position = failure.position,
            trace = %failure.trace(),
            "subscriber failed during broadcast: {}",
            failure.message()
        );
    }
}
