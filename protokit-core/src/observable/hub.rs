//! 事件中心（EventHub）
//!
//! 每个采用 Observable 能力的对象独占一个事件中心：
//! - 事件名须先声明，才能订阅与广播；
//! - 同一事件下同一处理器至多出现一次，重复订阅为空操作；
//! - 广播同步按订阅顺序调用，单个订阅者失败被隔离并上报；
//! - 支持全局静音与按事件静音。
//!
use super::config::{DispatchMode, HubConfig};
use super::handler::{Dispatch, Handler, Listener, Scope, Subscription};
use super::sink::{DispatchFailure, FailureSink, TracingSink};
use crate::error::{ProtoError, ProtoResult};
use bon::Builder;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Builder)]
pub struct EventHub {
    #[builder(skip)]
    observers: HashMap<String, Vec<Subscription>>,
    #[builder(skip)]
    muted: HashSet<String>,
    #[builder(skip)]
    all_muted: bool,
    #[builder(default)]
    config: HubConfig,
    /// 订阅者失败的上报端；未设置时使用 `TracingSink`
    sink: Option<Arc<dyn FailureSink>>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// 声明事件（幂等）：已存在的事件及其订阅者保持不变
    pub fn declare_events<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for event in events {
            self.observers.entry(event.into()).or_default();
        }
    }

    pub fn is_declared(&self, event: &str) -> bool {
        self.observers.contains_key(event)
    }

    /// 已声明的事件名（无序）
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.observers.keys().map(String::as_str)
    }

    pub fn has_subscribers(&self, event: &str) -> bool {
        self.subscriber_count(event) > 0
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.observers.get(event).map_or(0, Vec::len)
    }

    pub fn subscriptions(&self, event: &str) -> &[Subscription] {
        self.observers
            .get(event)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 以事件中心自身为作用域订阅
    pub fn subscribe(&mut self, event: &str, listener: impl Into<Listener>) -> ProtoResult<()> {
        self.subscribe_with_scope(event, listener, Scope::Hub)
    }

    /// 订阅事件：
    /// - 处理器不可调用 → `InvalidHandler`；
    /// - 事件未声明 → `UndeclaredEvent`；
    /// - 处理器已存在 → 空操作。
    pub fn subscribe_with_scope(
        &mut self,
        event: &str,
        listener: impl Into<Listener>,
        scope: Scope,
    ) -> ProtoResult<()> {
        let handler = match listener.into() {
            Listener::Callable(handler) => handler,
            Listener::Inert(_) => return Err(ProtoError::invalid_handler(event)),
        };
        let Some(subscriptions) = self.observers.get_mut(event) else {
            return Err(ProtoError::undeclared_event(event));
        };

        if subscriptions.iter().any(|s| s.handler.same(&handler)) {
            return Ok(());
        }
        subscriptions.push(Subscription { handler, scope });
        Ok(())
    }

    /// 移除处理器；事件未声明或处理器不存在时为空操作
    pub fn unsubscribe(&mut self, event: &str, handler: &Handler) {
        if let Some(subscriptions) = self.observers.get_mut(event) {
            if let Some(pos) = subscriptions.iter().position(|s| s.handler.same(handler)) {
                subscriptions.remove(pos);
            }
        }
    }

    /// 广播事件；任一订阅者显式返回 `false` 时结果为 `false`，否则为 `true`。
    ///
    /// 事件未声明、无订阅者或被静音时直接返回 `true`。
    pub fn broadcast(&mut self, event: &str, args: &[Value]) -> bool {
        if !self.has_subscribers(event) || self.is_muted(event) {
            return true;
        }

        match self.config.dispatch {
            DispatchMode::Live => self.dispatch_live(event, args),
            DispatchMode::Snapshot => self.dispatch_snapshot(event, args),
        }
    }

    fn dispatch_live(&mut self, event: &str, args: &[Value]) -> bool {
        let mut result = true;
        let mut position = 0;
        while let Some(subscription) = self
            .observers
            .get(event)
            .and_then(|s| s.get(position))
            .cloned()
        {
            result &= self.invoke(event, position, &subscription, args);
            position += 1;
        }
        result
    }

    fn dispatch_snapshot(&mut self, event: &str, args: &[Value]) -> bool {
        let snapshot = self.subscriptions(event).to_vec();
        let mut result = true;
        for (position, subscription) in snapshot.iter().enumerate() {
            result &= self.invoke(event, position, subscription, args);
        }
        result
    }

    /// 调用单个订阅者；返回值是否“非显式 false”。错误与 panic 均被捕获并上报。
    fn invoke(
        &mut self,
        event: &str,
        position: usize,
        subscription: &Subscription,
        args: &[Value],
    ) -> bool {
        let outcome = {
            let mut dispatch = Dispatch::new(self, event, subscription.scope.clone());
            panic::catch_unwind(AssertUnwindSafe(|| {
                subscription.handler.call(&mut dispatch, args)
            }))
        };

        let error = match outcome {
            Ok(Ok(value)) => return value != Value::Bool(false),
            Ok(Err(error)) => error,
            Err(payload) => anyhow::anyhow!("subscriber panicked: {}", panic_message(&*payload)),
        };

        self.report(&DispatchFailure {
            event,
            position,
            error: &error,
        });
        true
    }

    fn report(&self, failure: &DispatchFailure<'_>) {
        match &self.sink {
            Some(sink) => sink.report(failure),
            None => TracingSink.report(failure),
        }
    }

    /// 静音指定事件
    pub fn mute<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.muted.extend(events.into_iter().map(Into::into));
    }

    /// 静音全部事件（含尚未声明的）
    pub fn mute_all(&mut self) {
        self.all_muted = true;
    }

    /// 取消指定事件的静音；不影响全局静音
    pub fn unmute<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for event in events {
            self.muted.remove(event.as_ref());
        }
    }

    /// 取消全局静音并清空按事件静音
    pub fn unmute_all(&mut self) {
        self.all_muted = false;
        self.muted.clear();
    }

    pub fn is_muted(&self, event: &str) -> bool {
        self.all_muted || self.muted.contains(event)
    }

    pub fn is_all_muted(&self) -> bool {
        self.all_muted
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .observers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("EventHub")
            .field("observers", &counts)
            .field("muted", &self.muted)
            .field("all_muted", &self.all_muted)
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
