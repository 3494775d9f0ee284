use protokit_core::observable::Observable;
use protokit_macros::observable;

#[observable]
#[derive(Debug)]
struct Account {
    name: String,
}

fn main() {
    let mut account = Account::default();
    assert!(Account::EVENTS.is_empty());
    account.declare_events(["renamed"]);
    assert!(account.is_declared("renamed"));
    assert!(account.broadcast("renamed", &[]));
    assert!(account.name.is_empty());
}
