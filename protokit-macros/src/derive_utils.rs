use syn::punctuated::Punctuated;
use syn::{Attribute, Path, Token};

/// 结构体上合并后的 derive 列表与其余属性
///
/// 多个 `#[derive(..)]` 被合并为一个，按末段标识去重
/// （`Serialize` 与 `serde::Serialize` 视为同一项）。
pub(crate) struct DeriveSet {
    paths: Vec<Path>,
    others: Vec<Attribute>,
}

impl DeriveSet {
    pub(crate) fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut set = Self {
            paths: Vec::new(),
            others: Vec::new(),
        };
        for attr in attrs {
            if !attr.path().is_ident("derive") {
                set.others.push(attr.clone());
                continue;
            }
            match attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated) {
                Ok(list) => {
                    for path in list {
                        set.push(path);
                    }
                }
                // 无法解析的 derive 原样保留，交给编译器报错
                Err(_) => set.others.push(attr.clone()),
            }
        }
        set
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.paths.iter().any(|p| trailing_ident(p).as_deref() == Some(name))
    }

    pub(crate) fn derives_serde(&self) -> bool {
        self.contains("Serialize") || self.contains("Deserialize")
    }

    /// 缺失时前置追加
    pub(crate) fn require(&mut self, path: Path) {
        let exists = trailing_ident(&path).is_some_and(|name| self.contains(&name));
        if !exists {
            self.paths.insert(0, path);
        }
    }

    pub(crate) fn into_attrs(self) -> Vec<Attribute> {
        let Self { paths, others } = self;
        if paths.is_empty() {
            return others;
        }
        let merged: Attribute = syn::parse_quote!(#[derive(#(#paths),*)]);
        std::iter::once(merged).chain(others).collect()
    }

    fn push(&mut self, path: Path) {
        let duplicate = trailing_ident(&path).is_some_and(|name| self.contains(&name));
        if !duplicate {
            self.paths.push(path);
        }
    }
}

fn trailing_ident(path: &Path) -> Option<String> {
    path.segments.last().map(|s| s.ident.to_string())
}
