//! 订阅者（Handler）、调用作用域（Scope）与分发上下文（Dispatch）
//!
use super::EventHub;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type HandlerFn = dyn Fn(&mut Dispatch<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync;

/// 事件处理器句柄，身份按共享指针比较（同一句柄的克隆视为同一处理器）
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Dispatch<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn same(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(
        &self,
        dispatch: &mut Dispatch<'_>,
        args: &[Value],
    ) -> anyhow::Result<Value> {
        (self.0)(dispatch, args)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// 订阅输入：可调用的处理器，或不可调用的普通值（订阅时被拒绝）
#[derive(Clone, Debug)]
pub enum Listener {
    Callable(Handler),
    Inert(Value),
}

impl From<Handler> for Listener {
    fn from(handler: Handler) -> Self {
        Self::Callable(handler)
    }
}

impl From<&Handler> for Listener {
    fn from(handler: &Handler) -> Self {
        Self::Callable(handler.clone())
    }
}

impl From<Value> for Listener {
    fn from(value: Value) -> Self {
        Self::Inert(value)
    }
}

/// 订阅者被调用时的作用域；缺省为事件中心自身
#[derive(Clone, Default)]
pub enum Scope {
    #[default]
    Hub,
    Bound(Arc<dyn Any + Send + Sync>),
}

impl Scope {
    pub fn bound<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self::Bound(value)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub => f.write_str("Hub"),
            Self::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

/// 已登记的订阅：处理器 + 作用域
#[derive(Clone, Debug)]
pub struct Subscription {
    pub(crate) handler: Handler,
    pub(crate) scope: Scope,
}

impl Subscription {
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// 单次订阅者调用的上下文
///
/// 通过 `hub()` 可在回调内继续订阅、退订、静音或重入广播。
pub struct Dispatch<'a> {
    hub: &'a mut EventHub,
    event: &'a str,
    scope: Scope,
}

impl<'a> Dispatch<'a> {
    pub(crate) fn new(hub: &'a mut EventHub, event: &'a str, scope: Scope) -> Self {
        Self { hub, event, scope }
    }

    pub fn event(&self) -> &str {
        self.event
    }

    pub fn hub(&mut self) -> &mut EventHub {
        &mut *self.hub
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_hub_scope(&self) -> bool {
        matches!(self.scope, Scope::Hub)
    }

    /// 绑定作用域向下转型；作用域为事件中心或类型不符时返回 `None`
    pub fn scope_as<T: Any>(&self) -> Option<&T> {
        match &self.scope {
            Scope::Hub => None,
            Scope::Bound(value) => (**value).downcast_ref::<T>(),
        }
    }
}
