use crate::derive_utils::DeriveSet;
use crate::field_utils::ensure_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

const HUB_FIELD: &str = "hub";

/// #[observable] 宏实现
/// - 若缺失则追加 `hub` 字段（置于最前），serde 派生时标记 `#[serde(skip)]`
/// - 默认派生 `Default`（`default = false` 关闭）
/// - 实现 `::protokit_core::observable::Observable`（EVENTS/hub/hub_mut）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ObservableAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[observable] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let mut derives = DeriveSet::from_attrs(&st.attrs);
    let with_serde = derives.derives_serde();

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let hub_ty: Type = syn::parse_quote! { ::protokit_core::observable::EventHub };
    let hub_attrs = if with_serde {
        vec![syn::parse_quote!(#[serde(skip)])]
    } else {
        Vec::new()
    };
    ensure_field(fields_named, HUB_FIELD, &hub_ty, hub_attrs);

    if cfg.derive_default.unwrap_or(true) {
        derives.require(syn::parse_quote!(Default));
    }
    st.attrs = derives.into_attrs();

    let ident = &st.ident;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let events = cfg.events;

    let expanded = quote! {
        #st

        impl #impl_generics ::protokit_core::observable::Observable
            for #ident #ty_generics #where_clause
        {
            const EVENTS: &'static [&'static str] = &[#(#events),*];

            fn hub(&self) -> &::protokit_core::observable::EventHub { &self.hub }

            fn hub_mut(&mut self) -> &mut ::protokit_core::observable::EventHub { &mut self.hub }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct ObservableAttrConfig {
    events: Vec<LitStr>,
    derive_default: Option<bool>,
}

impl Parse for ObservableAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut events: Option<Vec<LitStr>> = None;
        let mut derive_default: Option<bool> = None;

        if input.is_empty() {
            return Ok(Self {
                events: Vec::new(),
                derive_default,
            });
        }

        let elems: Punctuated<ObservableAttrElem, Token![,]> =
            Punctuated::<ObservableAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                ObservableAttrElem::Events(span, list) => {
                    if events.is_some() {
                        return Err(syn::Error::new(span, "duplicate key 'events' in attribute"));
                    }
                    events = Some(list);
                }
                ObservableAttrElem::Default(span, b) => {
                    if derive_default.is_some() {
                        return Err(syn::Error::new(span, "duplicate key 'default' in attribute"));
                    }
                    derive_default = Some(b);
                }
            }
        }

        Ok(Self {
            events: events.unwrap_or_default(),
            derive_default,
        })
    }
}

enum ObservableAttrElem {
    Events(proc_macro2::Span, Vec<LitStr>),
    Default(proc_macro2::Span, bool),
}

impl Parse for ObservableAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        // `default` 是关键字，不能按 Ident 解析
        if input.peek(Token![default]) {
            let key: Token![default] = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            let lit: syn::LitBool = input.parse().map_err(|e| {
                syn::Error::new(e.span(), "expected boolean literal for 'default'")
            })?;
            return Ok(ObservableAttrElem::Default(key.span, lit.value()));
        }

        let key: syn::Ident = input.parse()?;
        if key == "events" {
            let _eq: Token![=] = input.parse()?;
            let content;
            syn::bracketed!(content in input);
            let list: Punctuated<LitStr, Token![,]> =
                Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            let list: Vec<LitStr> = list.into_iter().collect();

            let mut seen = std::collections::HashSet::new();
            for lit in &list {
                if !seen.insert(lit.value()) {
                    return Err(syn::Error::new(lit.span(), "duplicate event name"));
                }
            }
            Ok(ObservableAttrElem::Events(key.span(), list))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'events' or 'default'",
            ))
        }
    }
}
