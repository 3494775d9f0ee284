//! 成员值（Member）与方法包装（Method / Super）
//!
//! 扩展集中的条目以 `MemberDef` 表达（尚未组合的方法体或数据字段），
//! 组合后的成员为 `Member`：方法在包装时即捕获其覆盖的父级实现，
//! 调用期通过显式传入的 `Super` 访问，而非改写实例上的共享状态。
//!
use super::Instance;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// 方法体签名：`(实例, 父级实现, 位置参数) -> 返回值`
pub type MethodBody =
    Arc<dyn Fn(&mut Instance, Super<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// 扩展集中的成员定义（组合前）
#[derive(Clone)]
pub enum MemberDef {
    Method(MethodBody),
    Field(Value),
}

impl MemberDef {
    pub fn method<F>(body: F) -> Self
    where
        F: Fn(&mut Instance, Super<'_>, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::Method(Arc::new(body))
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }
}

impl From<Value> for MemberDef {
    fn from(value: Value) -> Self {
        Self::Field(value)
    }
}

impl fmt::Debug for MemberDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(_) => f.write_str("Method(..)"),
            Self::Field(value) => f.debug_tuple("Field").field(value).finish(),
        }
    }
}

/// 组合后成员表面上的一个成员
#[derive(Clone, Debug)]
pub enum Member {
    Method(Method),
    Field(Value),
}

impl Member {
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Self::Method(m) => Some(m),
            Self::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&Value> {
        match self {
            Self::Method(_) => None,
            Self::Field(v) => Some(v),
        }
    }
}

/// 已包装的方法：方法体 + 包装时捕获的被覆盖实现
#[derive(Clone)]
pub struct Method {
    inner: Arc<MethodInner>,
}

struct MethodInner {
    name: String,
    body: MethodBody,
    overridden: Option<Method>,
}

impl Method {
    /// 包装方法体，`overridden` 为父级表面上同名方法（若无则为 `None`，super 调用为空操作）
    pub(crate) fn wrap(
        name: impl Into<String>,
        body: MethodBody,
        overridden: Option<Method>,
    ) -> Self {
        Self {
            inner: Arc::new(MethodInner {
                name: name.into(),
                body,
                overridden,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// 被当前方法覆盖的父级实现
    pub fn overridden(&self) -> Option<&Method> {
        self.inner.overridden.as_ref()
    }

    /// 以给定实例调用；方法体收到的 `Super` 指向包装时捕获的父级实现
    pub fn invoke(&self, this: &mut Instance, args: &[Value]) -> anyhow::Result<Value> {
        let sup = Super {
            target: self.inner.overridden.as_ref(),
        };
        (self.inner.body)(this, sup, args)
    }

    /// 沿覆盖链的深度（无父级实现时为 1）
    pub fn depth(&self) -> usize {
        1 + self.overridden().map_or(0, Method::depth)
    }

    pub fn same(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.inner.name)
            .field("depth", &self.depth())
            .finish()
    }
}

/// 父级实现的引用：仅在方法调用期间有效
#[derive(Clone, Copy)]
pub struct Super<'a> {
    target: Option<&'a Method>,
}

impl<'a> Super<'a> {
    /// 调用被覆盖的实现；不存在时为空操作并返回 `Null`
    pub fn call(&self, this: &mut Instance, args: &[Value]) -> anyhow::Result<Value> {
        match self.target {
            Some(method) => method.invoke(this, args),
            None => Ok(Value::Null),
        }
    }

    pub fn exists(&self) -> bool {
        self.target.is_some()
    }

    pub fn method(&self) -> Option<&'a Method> {
        self.target
    }
}

impl fmt::Debug for Super<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Super")
            .field("target", &self.target.map(Method::name))
            .finish()
    }
}
