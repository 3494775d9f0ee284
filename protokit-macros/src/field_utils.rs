use syn::{Attribute, Field, FieldsNamed, Token, Type, punctuated::Punctuated};

pub(crate) fn has_field_named(fields_named: &FieldsNamed, name: &str) -> bool {
    fields_named
        .named
        .iter()
        .any(|f| f.ident.as_ref().map(|i| i == name).unwrap_or(false))
}

/// 确保具名字段结构体包含所需字段
/// - 已存在同名字段时保留原定义与位置，返回 false；
/// - 缺失时以给定类型与属性新增并置于最前，其余字段保持原有顺序，返回 true。
pub(crate) fn ensure_field(
    fields_named: &mut FieldsNamed,
    name: &str,
    ty: &Type,
    attrs: Vec<Attribute>,
) -> bool {
    if has_field_named(fields_named, name) {
        return false;
    }

    let ident: syn::Ident = syn::parse_str(name).expect("valid field ident");
    let mut field: Field = syn::parse_quote! { #ident: #ty };
    field.attrs = attrs;

    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();
    new_named.push(field);
    for f in fields_named.named.clone().into_iter() {
        new_named.push(f);
    }
    fields_named.named = new_named;
    true
}
