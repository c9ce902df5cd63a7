//! Wire a small application: settings, a class locator, a factory service and
//! a module. Run with `RUST_LOG=wirebox_core=debug` to watch resolution.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use wirebox::{
    instance, Argument, BoxError, ClassObject, ContainerBuilder, Definition, Instance, MethodCall, ResolvedArgument,
    Service, ServiceModule, ServiceObject, StaticClassLocator,
};

#[derive(Serialize)]
struct Settings {
    database_url: String,
    greeting: String,
}

#[derive(Service)]
struct Database {
    url: String,
}

struct Greeter {
    database: Instance,
    greeting: Mutex<String>,
}

impl Service for Greeter {
    fn invoke(&self, method: &str, arguments: Vec<ResolvedArgument>) -> Option<wirebox::Invocation<'_>> {
        if method != "set_greeting" {
            return None;
        }
        Some(Box::pin(async move {
            let greeting = arguments
                .first()
                .and_then(ResolvedArgument::as_value)
                .and_then(Value::as_str)
                .ok_or("greeting must be a string")?;
            *self.greeting.lock().map_err(|_| "greeting lock poisoned")? = greeting.to_string();
            Ok::<Option<Instance>, BoxError>(None)
        }))
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_class = ClassObject::new(|arguments| async move {
        let url = arguments[0].as_value().and_then(Value::as_str).unwrap_or_default().to_string();
        Ok(Some(instance(Database { url })))
    });

    let greeters = ServiceModule::new("greeting")
        .instance(
            "greeter_factory",
            instance(ServiceObject::new().method("create", |arguments| async move {
                let database = arguments
                    .into_iter()
                    .next()
                    .and_then(ResolvedArgument::into_service)
                    .ok_or("database missing")?;
                Ok::<Option<Instance>, BoxError>(Some(instance(Greeter {
                    database,
                    greeting: Mutex::new(String::new()),
                })))
            })),
        )
        .definition(
            "greeter",
            Definition::service_method_factory("greeter_factory", "create", vec![Argument::reference("database")])
                .with_method_call(MethodCall::new("set_greeting", vec![Argument::parameter("greeting")])),
        );

    let container = ContainerBuilder::new()
        .parameters(&Settings {
            database_url: "postgres://localhost/app".into(),
            greeting: "hello from wirebox".into(),
        })
        .class_locator(StaticClassLocator::default().with("Database", database_class))
        .definition(
            "database",
            Definition::class_constructor("Database", vec![Argument::parameter("database_url")]),
        )
        .module(greeters)
        .build()?;

    let greeter = container.get_one("greeter").await?;
    let greeter = greeter.downcast_ref::<Greeter>().ok_or("greeter has the wrong type")?;
    let database = greeter.database.downcast_ref::<Database>().ok_or("database has the wrong type")?;
    let greeting = greeter.greeting.lock().map_err(|_| "greeting lock poisoned")?.clone();
    tracing::info!(database = %database.url, "{}", greeting);
    Ok(())
}
