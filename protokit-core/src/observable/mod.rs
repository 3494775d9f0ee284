//! 事件子系统（observable）
//!
//! 提供同步、单线程的发布/订阅能力：
//! - `EventHub`：事件声明、订阅/退订、广播与静音；
//! - `Handler` / `Listener` / `Scope` / `Dispatch`：订阅者及其调用上下文；
//! - `FailureSink`：订阅者失败的上报端，缺省 `TracingSink`；
//! - `Observable`：可混入任意类型的能力 trait。
//!
mod capability;
mod config;
mod handler;
mod hub;
mod sink;

pub use capability::Observable;
pub use config::{DispatchMode, HubConfig};
pub use handler::{Dispatch, Handler, Listener, Scope, Subscription};
pub use hub::EventHub;
pub use sink::{DispatchFailure, FailureSink, TracingSink};
