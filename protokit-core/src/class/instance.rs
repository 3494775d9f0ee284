//! 行为实例（Instance）
//!
//! 持有所属行为的句柄与自身字段；字段查找先看自身再看行为表面。
//!
use super::Behavior;
use super::member::Member;
use crate::error::{ProtoError, ProtoResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

pub struct Instance {
    behavior: Behavior,
    fields: Map<String, Value>,
}

impl Instance {
    pub(crate) fn bare(behavior: Behavior) -> Self {
        Self {
            behavior,
            fields: Map::new(),
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// 读取字段：自身字段优先，其次为行为表面上的数据成员
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .get(name)
            .or_else(|| self.behavior.member(name).and_then(Member::as_field))
    }

    /// 读取并反序列化字段
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> ProtoResult<Option<T>> {
        self.get(name)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(ProtoError::from)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// 自身字段（不含行为表面上的默认值）
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn responds_to(&self, name: &str) -> bool {
        !self.fields.contains_key(name)
            && matches!(self.behavior.member(name), Some(Member::Method(_)))
    }

    pub fn is_instance_of(&self, behavior: &Behavior) -> bool {
        self.behavior.inherits_from(behavior)
    }

    /// 调用成员方法
    pub fn call(&mut self, name: &str, args: &[Value]) -> ProtoResult<Value> {
        if self.fields.contains_key(name) {
            return Err(self.not_callable(name));
        }
        let method = match self.behavior.member(name) {
            Some(Member::Method(m)) => m.clone(),
            Some(Member::Field(_)) => return Err(self.not_callable(name)),
            None => {
                return Err(ProtoError::MemberNotFound {
                    behavior: self.behavior.name().to_string(),
                    member: name.to_string(),
                });
            }
        };

        method
            .invoke(self, args)
            .map_err(|source| ProtoError::Invocation {
                member: name.to_string(),
                source,
            })
    }

    fn not_callable(&self, name: &str) -> ProtoError {
        ProtoError::NotCallable {
            behavior: self.behavior.name().to_string(),
            member: name.to_string(),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("behavior", &self.behavior.name())
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Extension;
    use serde_json::json;

    fn counter() -> Behavior {
        Behavior::define(
            Extension::named("Counter")
                .field("step", 1)
                .method("bump", |this, _, _| {
                    let step = this.get_as::<i64>("step")?.unwrap_or(1);
                    let count = this.get_as::<i64>("count")?.unwrap_or(0) + step;
                    this.set("count", count);
                    Ok(json!(count))
                }),
        )
    }

    #[test]
    fn own_fields_shadow_surface_fields() {
        let mut inst = counter().new_instance().unwrap();
        assert_eq!(inst.get("step"), Some(&json!(1)));
        inst.set("step", 5);
        assert_eq!(inst.get("step"), Some(&json!(5)));
        assert_eq!(inst.call("bump", &[]).unwrap(), json!(5));
        assert_eq!(inst.fields().len(), 2);
    }

    #[test]
    fn calling_non_methods_is_rejected() {
        let mut inst = counter().new_instance().unwrap();
        assert!(matches!(
            inst.call("step", &[]),
            Err(ProtoError::NotCallable { .. })
        ));
        assert!(matches!(
            inst.call("missing", &[]),
            Err(ProtoError::MemberNotFound { .. })
        ));

        inst.set("bump", "shadowed");
        assert!(!inst.responds_to("bump"));
        assert!(matches!(
            inst.call("bump", &[]),
            Err(ProtoError::NotCallable { .. })
        ));
    }

    #[test]
    fn get_as_reports_type_mismatch() {
        let mut inst = counter().new_instance().unwrap();
        inst.set("count", "many");
        assert!(matches!(
            inst.get_as::<i64>("count"),
            Err(ProtoError::Serde { .. })
        ));
        assert_eq!(inst.get_as::<i64>("absent").unwrap(), None);
    }
}
