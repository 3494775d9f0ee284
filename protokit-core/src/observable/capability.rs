//! Observable 能力（mixin）
//!
//! 任意类型只需提供对内嵌 `EventHub` 的访问，即获得完整的事件声明、
//! 订阅、广播与静音接口。通常由 `#[observable]` 宏生成实现。
//!
use super::{EventHub, Handler, Listener, Scope};
use crate::error::ProtoResult;
use serde_json::Value;

pub trait Observable {
    /// 类型级声明的事件列表，由 `declare_default_events` 声明到事件中心
    const EVENTS: &'static [&'static str] = &[];

    fn hub(&self) -> &EventHub;

    fn hub_mut(&mut self) -> &mut EventHub;

    fn declare_default_events(&mut self) {
        self.hub_mut().declare_events(Self::EVENTS.iter().copied());
    }

    fn declare_events<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hub_mut().declare_events(events);
    }

    fn is_declared(&self, event: &str) -> bool {
        self.hub().is_declared(event)
    }

    fn has_subscribers(&self, event: &str) -> bool {
        self.hub().has_subscribers(event)
    }

    fn subscribe(&mut self, event: &str, listener: impl Into<Listener>) -> ProtoResult<()> {
        self.hub_mut().subscribe(event, listener)
    }

    fn subscribe_with_scope(
        &mut self,
        event: &str,
        listener: impl Into<Listener>,
        scope: Scope,
    ) -> ProtoResult<()> {
        self.hub_mut().subscribe_with_scope(event, listener, scope)
    }

    fn unsubscribe(&mut self, event: &str, handler: &Handler) {
        self.hub_mut().unsubscribe(event, handler);
    }

    fn broadcast(&mut self, event: &str, args: &[Value]) -> bool {
        self.hub_mut().broadcast(event, args)
    }

    fn mute<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hub_mut().mute(events);
    }

    fn mute_all(&mut self) {
        self.hub_mut().mute_all();
    }

    fn unmute<I, S>(&mut self, events: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.hub_mut().unmute(events);
    }

    fn unmute_all(&mut self) {
        self.hub_mut().unmute_all();
    }

    fn is_muted(&self, event: &str) -> bool {
        self.hub().is_muted(event)
    }
}
