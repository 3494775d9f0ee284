//! 类组合（class）
//!
//! 在单继承链上组合行为：
//! - `Extension`：扩展成员集合（方法 / 字段 / 构造器）；
//! - `compose`：以父行为为基础合并扩展集，得到不可变的新 `Behavior`；
//! - `Super`：覆盖方法内调用直接父级实现的显式句柄；
//! - `Instance`：行为实例，构造时沿链调用构造器。
//!
mod behavior;
mod extension;
mod instance;
mod member;

pub use behavior::{Behavior, compose};
pub use extension::{CONSTRUCTOR, Extension};
pub use instance::Instance;
pub use member::{Member, MemberDef, Method, MethodBody, Super};
