//! 扩展集（Extension）
//!
//! 组合时合并进新行为的成员集合，保持插入顺序；同名条目后者覆盖前者。
//!
use super::member::{MemberDef, Super};
use super::Instance;
use serde_json::Value;

/// 构造器在扩展集中的保留名
pub const CONSTRUCTOR: &str = "constructor";

/// 新行为的扩展成员
#[derive(Clone, Debug, Default)]
pub struct Extension {
    name: Option<String>,
    entries: Vec<(String, MemberDef)>,
}

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带名称的扩展集，名称用于日志与错误信息
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            entries: Vec::new(),
        }
    }

    pub fn member(mut self, name: impl Into<String>, def: impl Into<MemberDef>) -> Self {
        let name = name.into();
        let def = def.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = def,
            None => self.entries.push((name, def)),
        }
        self
    }

    pub fn method<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Instance, Super<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.member(name, MemberDef::method(body))
    }

    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, MemberDef::Field(value.into()))
    }

    pub fn constructor<F>(self, body: F) -> Self
    where
        F: Fn(&mut Instance, Super<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.method(CONSTRUCTOR, body)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Vec<(String, MemberDef)>) {
        (self.name, self.entries)
    }
}
