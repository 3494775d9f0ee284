use protokit_core::observable::{EventHub, Observable};
use protokit_macros::observable;

#[observable(events = ["tick"], default = false)]
struct Clock<T> {
    hub: EventHub,
    source: T,
}

impl<T> Clock<T> {
    fn new(source: T) -> Self {
        let mut clock = Self {
            hub: EventHub::new(),
            source,
        };
        clock.declare_default_events();
        clock
    }
}

fn main() {
    let clock = Clock::new(7u8);
    assert!(clock.is_declared("tick"));
    assert_eq!(clock.source, 7);
}
