use anyhow::Result;
use protokit_core::class::{Behavior, Extension, Instance};
use protokit_core::observable::{EventHub, Handler, Observable};
use protokit_macros::observable;
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, fmt};

fn animal() -> Behavior {
    Behavior::define(
        Extension::named("Animal")
            .field("legs", 4)
            .constructor(|this, _, args| {
                let name = args.first().cloned().unwrap_or(json!("nobody"));
                this.set("name", name);
                Ok(Value::Null)
            })
            .method("sound", |_, _, _| Ok(json!("...")))
            .method("speak", |this, _, _| {
                let name = this.get("name").cloned().unwrap_or(Value::Null);
                let sound = this.call("sound", &[])?;
                Ok(json!(format!(
                    "{} says {}",
                    name.as_str().unwrap_or("?"),
                    sound.as_str().unwrap_or("?")
                )))
            }),
    )
}

fn dog(animal: &Behavior) -> Behavior {
    animal.extend(
        Extension::named("Dog")
            .constructor(|this, sup, args| {
                sup.call(this, args)?;
                this.set("tricks", json!([]));
                Ok(Value::Null)
            })
            .method("sound", |_, _, _| Ok(json!("woof")))
            .method("speak", |this, sup, args| {
                let base = sup.call(this, args)?;
                Ok(json!(format!("{}!", base.as_str().unwrap_or_default())))
            }),
    )
}

#[observable(events = ["arrived", "left"], default = false)]
struct Kennel {
    hub: EventHub,
    residents: Vec<Instance>,
}

impl Kennel {
    fn new() -> Self {
        let mut kennel = Self {
            hub: EventHub::new(),
            residents: Vec::new(),
        };
        kennel.declare_default_events();
        kennel
    }

    fn admit(&mut self, resident: Instance) -> bool {
        let name = resident.get("name").cloned().unwrap_or(Value::Null);
        self.residents.push(resident);
        self.broadcast("arrived", &[name])
    }
}

fn main() -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let animal = animal();
    let dog = dog(&animal);

    let mut rex = dog.instantiate(&[json!("Rex")])?;
    println!("{}", rex.call("speak", &[])?);
    println!("legs: {:?}", rex.get_as::<u32>("legs")?);
    println!("is animal: {}", rex.is_instance_of(&animal));

    let mut kennel = Kennel::new();
    kennel.subscribe(
        "arrived",
        Handler::new(|_, args| {
            println!("welcome {}", args.first().cloned().unwrap_or(Value::Null));
            Ok(Value::Null)
        }),
    )?;
    // 失败的订阅者不会影响后续订阅者，错误经 tracing 上报
    kennel.subscribe(
        "arrived",
        Handler::new(|_, _| Err(anyhow::anyhow!("kennel is full"))),
    )?;
    kennel.subscribe(
        "arrived",
        Handler::new(|d, args| {
            println!("[{}] logged {:?}", d.event(), args);
            Ok(Value::Null)
        }),
    )?;

    let ok = kennel.admit(rex);
    println!("broadcast ok: {ok}");

    kennel.mute(["arrived"]);
    let fido = dog.instantiate(&[json!("Fido")])?;
    println!("muted broadcast ok: {}", kennel.admit(fido));
    println!("residents: {}", kennel.residents.len());

    Ok(())
}
