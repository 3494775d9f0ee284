//! 行为（Behavior）与组合（compose）
//!
//! 行为是不可变的成员表面 + 可选构造器，以父行为为基础按扩展集合并：
//! - 父表面上的成员全部保留，扩展集同名成员覆盖之；
//! - 扩展集中的方法在包装时捕获父表面上的同名方法作为 super 目标；
//! - `constructor` 方法被单独提取，其 super 目标为父行为的构造器。
//!
use super::extension::{CONSTRUCTOR, Extension};
use super::member::{Member, MemberDef, Method};
use super::Instance;
use crate::error::{ProtoError, ProtoResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

const ANONYMOUS: &str = "anonymous";

/// 组合得到的行为（类），克隆开销为一次引用计数
#[derive(Clone)]
pub struct Behavior {
    inner: Arc<BehaviorInner>,
}

struct BehaviorInner {
    name: String,
    parent: Option<Behavior>,
    surface: BTreeMap<String, Member>,
    constructor: Option<Method>,
}

/// 以 `base`（缺省为空行为）为基础，合并 `extension` 得到新行为。永不失败。
pub fn compose(base: Option<&Behavior>, extension: Extension) -> Behavior {
    let (name, entries) = extension.into_parts();
    let name = name.unwrap_or_else(|| ANONYMOUS.to_string());

    let mut surface = base.map(|b| b.inner.surface.clone()).unwrap_or_default();
    let parent_constructor = base.and_then(|b| b.inner.constructor.clone());
    let mut constructor = None;
    let mut overrides = 0usize;

    for (member_name, def) in entries {
        if member_name == CONSTRUCTOR {
            match def {
                MemberDef::Method(body) => {
                    constructor = Some(Method::wrap(
                        CONSTRUCTOR,
                        body,
                        parent_constructor.clone(),
                    ));
                }
                MemberDef::Field(value) => {
                    tracing::debug!(
                        behavior = %name,
                        ?value,
                        "non-function constructor ignored"
                    );
                }
            }
            continue;
        }

        let overridden = surface.get(&member_name).and_then(Member::as_method).cloned();
        if surface.contains_key(&member_name) {
            overrides += 1;
        }

        let member = match def {
            MemberDef::Method(body) => {
                Member::Method(Method::wrap(member_name.clone(), body, overridden))
            }
            MemberDef::Field(value) => Member::Field(value),
        };
        surface.insert(member_name, member);
    }

    tracing::debug!(
        behavior = %name,
        parent = base.map(Behavior::name),
        members = surface.len(),
        overrides,
        constructor = constructor.is_some(),
        "behavior composed"
    );

    Behavior {
        inner: Arc::new(BehaviorInner {
            name,
            parent: base.cloned(),
            surface,
            constructor,
        }),
    }
}

impl Behavior {
    /// 没有任何成员与构造器的空行为
    pub fn root() -> Self {
        compose(None, Extension::new())
    }

    /// 以空行为为基础定义新行为
    pub fn define(extension: Extension) -> Self {
        compose(None, extension)
    }

    /// 以当前行为为基础派生新行为
    pub fn extend(&self, extension: Extension) -> Self {
        compose(Some(self), extension)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parent(&self) -> Option<&Behavior> {
        self.inner.parent.as_ref()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.inner.surface.get(name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.inner.surface.contains_key(name)
    }

    /// 扁平化成员表面上的全部名称（按字典序）
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.inner.surface.keys().map(String::as_str)
    }

    pub fn has_constructor(&self) -> bool {
        self.inner.constructor.is_some()
    }

    pub fn constructor(&self) -> Option<&Method> {
        self.inner.constructor.as_ref()
    }

    /// 当前行为是否为 `other` 本身或其派生（按身份比较）
    pub fn inherits_from(&self, other: &Behavior) -> bool {
        let mut cursor = Some(self);
        while let Some(b) = cursor {
            if b.same(other) {
                return true;
            }
            cursor = b.parent();
        }
        false
    }

    pub fn same(&self, other: &Behavior) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// 创建实例并以位置参数调用构造器（无构造器时为空操作）
    pub fn instantiate(&self, args: &[Value]) -> ProtoResult<Instance> {
        let mut instance = Instance::bare(self.clone());
        if let Some(constructor) = self.inner.constructor.clone() {
            constructor
                .invoke(&mut instance, args)
                .map_err(|source| ProtoError::Invocation {
                    member: format!("{}.{CONSTRUCTOR}", self.name()),
                    source,
                })?;
        }
        Ok(instance)
    }

    pub fn new_instance(&self) -> ProtoResult<Instance> {
        self.instantiate(&[])
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("name", &self.inner.name)
            .field("parent", &self.parent().map(Behavior::name))
            .field("members", &self.inner.surface.keys().collect::<Vec<_>>())
            .field("constructor", &self.has_constructor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_composition_yields_empty_behavior() {
        let b = Behavior::root();
        assert_eq!(b.member_names().count(), 0);
        assert!(!b.has_constructor());
        assert!(b.parent().is_none());
        assert!(b.new_instance().is_ok());
    }

    #[test]
    fn extension_members_land_on_surface() {
        let b = Behavior::define(
            Extension::new()
                .field("foobar", 1)
                .method("foobarfun", |_, _, _| Ok(json!(2))),
        );
        assert_eq!(b.member("foobar").and_then(Member::as_field), Some(&json!(1)));
        assert!(b.member("foobarfun").and_then(Member::as_method).is_some());
    }

    #[test]
    fn override_captures_parent_method_at_wrap_time() {
        let base =
            Behavior::define(Extension::new().method("speak", |_, _, _| Ok(json!("base"))));
        let child = base.extend(
            Extension::new().method("speak", |this, sup, args| sup.call(this, args)),
        );

        let child_speak = child.member("speak").and_then(Member::as_method).unwrap();
        let base_speak = base.member("speak").and_then(Member::as_method).unwrap();
        assert!(child_speak.overridden().unwrap().same(base_speak));
        assert_eq!(child_speak.depth(), 2);
    }

    #[test]
    fn method_over_field_gets_noop_super() {
        let base = Behavior::define(Extension::new().field("size", 3));
        let child = base.extend(Extension::new().method("size", |this, sup, args| {
            assert!(!sup.exists());
            sup.call(this, args)
        }));

        let mut inst = child.new_instance().unwrap();
        assert_eq!(inst.call("size", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn constructor_is_extracted_from_surface() {
        let b = Behavior::define(
            Extension::new().constructor(|_, _, _| Ok(Value::Null)),
        );
        assert!(b.has_constructor());
        assert!(!b.has_member(CONSTRUCTOR));
    }

    #[test]
    fn non_function_constructor_is_ignored() {
        let b = Behavior::define(
            Extension::new()
                .field(CONSTRUCTOR, "nope")
                .field("x", 1),
        );
        assert!(!b.has_constructor());
        assert!(!b.has_member(CONSTRUCTOR));
        assert!(b.has_member("x"));
    }

    #[test]
    fn inherits_from_walks_parent_chain() {
        let a = Behavior::define(Extension::named("A"));
        let b = a.extend(Extension::named("B"));
        let c = b.extend(Extension::named("C"));
        let other = Behavior::define(Extension::named("A"));

        assert!(c.inherits_from(&c));
        assert!(c.inherits_from(&b));
        assert!(c.inherits_from(&a));
        assert!(!a.inherits_from(&c));
        assert!(!c.inherits_from(&other));
    }

    #[test]
    fn failing_constructor_surfaces_invocation_error() {
        let b = Behavior::define(
            Extension::named("Strict").constructor(|_, _, _| Err(anyhow::anyhow!("rejected"))),
        );
        match b.new_instance() {
            Err(ProtoError::Invocation { member, .. }) => assert_eq!(member, "Strict.constructor"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
