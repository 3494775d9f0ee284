use protokit_core::observable::{Handler, Observable};
use protokit_macros::observable;
use serde_json::{Value, json};

#[observable(events = ["deposited", "withdrawn"])]
struct Wallet {
    balance: i64,
}

fn main() {
    let mut wallet = Wallet {
        balance: 10,
        ..Default::default()
    };
    wallet.declare_default_events();

    wallet
        .subscribe(
            "withdrawn",
            Handler::new(|_, args| Ok(Value::Bool(args[0].as_i64() != Some(0)))),
        )
        .unwrap();

    assert!(wallet.broadcast("withdrawn", &[json!(5)]));
    assert!(!wallet.broadcast("withdrawn", &[json!(0)]));
    assert!(wallet.broadcast("deposited", &[]));
    assert_eq!(wallet.balance, 10);
}
