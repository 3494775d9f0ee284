//! 统一错误定义
//!
//! 覆盖事件订阅校验、实例成员调用与字段反序列化的最小必要集合。
//! 组合（`compose`）本身是全函数，不会产生错误；订阅者执行期的错误
//! 在广播内部被隔离，也不会出现在这里。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProtoError {
    // --- 事件订阅 ---
    #[error("passed handler is not callable: event={event}")]
    InvalidHandler { event: String },
    #[error("event {event} is not supported, declare it with `declare_events` first")]
    UndeclaredEvent { event: String },

    // --- 实例成员 ---
    #[error("member not found: behavior={behavior}, member={member}")]
    MemberNotFound { behavior: String, member: String },
    #[error("member is not callable: behavior={behavior}, member={member}")]
    NotCallable { behavior: String, member: String },
    #[error("invocation failed: member={member}, reason={source}")]
    Invocation {
        member: String,
        #[source]
        source: anyhow::Error,
    },

    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
}

impl ProtoError {
    pub fn invalid_handler(event: impl Into<String>) -> Self {
        Self::InvalidHandler {
            event: event.into(),
        }
    }

    pub fn undeclared_event(event: impl Into<String>) -> Self {
        Self::UndeclaredEvent {
            event: event.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type ProtoResult<T> = Result<T, ProtoError>;
