mod derive_utils;
mod field_utils;
mod observable;

use proc_macro::TokenStream;

/// Observable 宏
/// - 若缺失则追加字段：`hub: ::protokit_core::observable::EventHub`（置于字段最前）；
///   结构体派生了 serde 的 Serialize/Deserialize 时，为该字段追加 `#[serde(skip)]`
/// - 自动为目标结构体实现 `::protokit_core::observable::Observable`
/// - 支持参数：`#[observable(events = ["created", "renamed"], default = true|false)]`
///   - `events` 生成 `Observable::EVENTS`，默认空列表
///   - `default` 默认 `true`（派生 Default）。为 `false` 时由用户自行提供构造方式。
#[proc_macro_attribute]
pub fn observable(attr: TokenStream, item: TokenStream) -> TokenStream {
    observable::expand(attr, item)
}
