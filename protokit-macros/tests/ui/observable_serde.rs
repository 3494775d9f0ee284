use protokit_core::observable::Observable;
use protokit_macros::observable;
use serde::{Deserialize, Serialize};

#[observable(events = ["saved"])]
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    title: String,
}

fn main() {
    let mut doc: Document = serde_json::from_str(r#"{"title":"draft"}"#).unwrap();
    doc.declare_default_events();
    assert!(doc.is_declared("saved"));

    let raw = serde_json::to_string(&doc).unwrap();
    assert_eq!(raw, r#"{"title":"draft"}"#);
}
