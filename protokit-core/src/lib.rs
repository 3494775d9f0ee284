//! 对象组合基础库（protokit-core）
//!
//! 为缺少原生类继承与多播事件的对象模型提供两个相互独立、可组合的构件：
//! - 类组合（`class`）：单继承链上的行为合并，覆盖方法可通过显式的
//!   `Super` 调用直接父级实现，构造器沿继承链串联；
//! - 事件能力（`observable`）：声明事件、订阅/退订、同步广播、
//!   单订阅者失败隔离，以及全局/按事件静音。
//!
//! 两者在运行期没有数据往来；`EventHub` 通常以字段形式嵌入宿主类型
//! （见 `protokit-macros` 的 `#[observable]`），各自也可单独使用。
//!
//! 典型用法：
//! 1. 以 `Extension` 描述成员，经 `compose` / `Behavior::extend` 得到行为；
//! 2. `Behavior::instantiate` 创建实例，`Instance::call` 调用方法；
//! 3. 在宿主类型上实现 `Observable`（或使用宏），声明事件后订阅与广播。
//!
pub mod class;
pub mod error;
pub mod observable;

// 允许在本 crate 内部通过 ::protokit_core 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::protokit_core 路径。
extern crate self as protokit_core;
