//! Table operations: instances, definitions, parameters and their lookups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use wirebox_core::{
    Argument, BoxError, Container, ContainerError, Definition, FactorySource, Instance, Invocation, MethodCall,
    Reference, ResolvedArgument, Service,
};

struct Foo;
impl Service for Foo {}

struct FooFactory;

impl Service for FooFactory {
    fn invoke(&self, method: &str, _arguments: Vec<ResolvedArgument>) -> Option<Invocation<'_>> {
        if method != "instantiate" {
            return None;
        }
        Some(Box::pin(async { Ok::<_, BoxError>(Some(Arc::new(Foo) as Instance)) }))
    }
}

fn add_factory_and_definition(container: &Container, id: &str) -> Definition {
    let factory_id = format!("app.{}_factory", id);
    container.set(factory_id.clone(), Arc::new(FooFactory) as Instance);
    let definition = Definition::service_method_factory(factory_id, "instantiate", vec![]);
    container.set_definition(id, definition.clone()).unwrap();
    definition
}

#[tokio::test]
async fn set_replaces_previous_instance() {
    let container = Container::new();
    let first: Instance = Arc::new(Foo);
    let second: Instance = Arc::new(Foo);
    container.set("foo", first.clone()).set("foo", second.clone());
    let service = container.get_one("foo").await.unwrap();
    assert!(Arc::ptr_eq(&service, &second));
    assert!(!Arc::ptr_eq(&service, &first));
}

#[test]
fn get_definition_returns_what_was_set() {
    let container = Container::new();
    let definition = add_factory_and_definition(&container, "foo");
    assert_eq!(*container.get_definition("foo").unwrap(), definition);
}

#[test]
fn get_definition_without_definition_fails() {
    let container = Container::new();
    let err = container.get_definition("foo").unwrap_err();
    assert!(matches!(err, ContainerError::UndefinedServiceDefinition(_)));
    assert_eq!(err.to_string(), "Undefined service definition for identifier \"foo\"");
}

#[test]
fn unused_definition_can_be_replaced() {
    let container = Container::new();
    add_factory_and_definition(&container, "foo");
    let replacement = Definition::class_constructor("Foo", vec![Argument::value("x")]);
    container.set_definition("foo", replacement.clone()).unwrap();
    assert_eq!(*container.get_definition("foo").unwrap(), replacement);
}

#[tokio::test]
async fn used_definition_cannot_be_replaced() {
    let container = Container::new();
    let definition = add_factory_and_definition(&container, "foo");
    container.get(&["foo"]).await.unwrap();
    let err = container.set_definition("foo", definition).unwrap_err();
    assert!(matches!(err, ContainerError::ServiceDefinitionAlreadyUsed(_)));
    assert_eq!(
        err.to_string(),
        "Service definition for \"foo\" has already been used to instantiate a service, refusing to modify it"
    );
}

#[test]
fn definition_builders_keep_source_arguments_and_calls() {
    let definition = Definition::function_factory("app.factory", vec![Argument::reference("bar")])
        .with_method_call(MethodCall::new("init", vec![Argument::parameter("level")]))
        .with_method_call(MethodCall::new("start", vec![]));
    assert_eq!(definition.source(), &FactorySource::Function(Reference::new("app.factory")));
    assert_eq!(definition.arguments(), &[Argument::reference("bar")]);
    let calls: Vec<&str> = definition.method_calls().iter().map(MethodCall::method).collect();
    assert_eq!(calls, ["init", "start"]);
    assert_eq!(definition.method_calls()[0].arguments(), &[Argument::parameter("level")]);
}

#[test]
fn parameters_are_set_replaced_and_looked_up() {
    let container = Container::new();
    assert!(!container.has_parameter("foo"));
    container.set_parameter("foo", "bar");
    assert_eq!(container.get_parameter("foo").unwrap(), json!("bar"));
    container.set_parameter("foo", "qux");
    assert_eq!(container.get_parameter("foo").unwrap(), json!("qux"));
    container.set_parameter("answer", 42);
    assert!(container.has_parameter("answer"));
}

#[test]
fn missing_parameter_fails() {
    let container = Container::new();
    let err = container.get_parameter("foo").unwrap_err();
    assert!(matches!(err, ContainerError::UndefinedParameter(_)));
    assert_eq!(err.to_string(), "Undefined parameter for identifier \"foo\"");
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Database {
    url: String,
    pool_size: u32,
}

#[derive(Serialize)]
struct Settings {
    environment: &'static str,
    database: Database,
}

#[test]
fn parameters_from_serializable_settings() {
    let container = Container::new();
    container
        .set_parameters(&Settings {
            environment: "test",
            database: Database {
                url: "postgres://localhost/app".into(),
                pool_size: 4,
            },
        })
        .unwrap();
    assert_eq!(container.get_parameter("environment").unwrap(), json!("test"));
    let database: Database = container.get_parameter_as("database").unwrap();
    assert_eq!(database.pool_size, 4);
    assert_eq!(database.url, "postgres://localhost/app");
}

#[test]
fn parameters_must_be_an_object() {
    let container = Container::new();
    let result = container.set_parameters(&vec![1, 2, 3]);
    assert!(matches!(result, Err(ContainerError::ParametersNotAnObject)));
    assert!(container.set_parameters(&json!({ "level": "info" })).is_ok());
    assert_eq!(container.get_parameter("level").unwrap(), json!("info"));
}

#[test]
fn typed_parameter_with_wrong_shape_fails() {
    let container = Container::new();
    container.set_parameter("database", "not a table");
    let err = container.get_parameter_as::<Database>("database").unwrap_err();
    assert!(matches!(err, ContainerError::Json(_)));
}

#[test]
fn has_reflects_instances_and_definitions_only() {
    let container = Container::new();
    assert!(!container.has("foo"));
    assert!(!container.has_instance("foo"));
    assert!(!container.has_definition("foo"));

    container.set("foo", Arc::new(Foo) as Instance);
    assert!(container.has("foo"));
    assert!(container.has_instance("foo"));
    assert!(!container.has_definition("foo"));

    add_factory_and_definition(&container, "bar");
    assert!(container.has("bar"));
    assert!(container.has_definition("bar"));
    assert!(!container.has_instance("bar"));

    container.register_instance_locator(|_id: String| async { Ok::<_, BoxError>(Some(Arc::new(Foo) as Instance)) });
    assert!(!container.has("qux"));
}

#[test]
fn instances_downcast_to_their_concrete_type() {
    struct Counter(u32);
    impl Service for Counter {}

    let instance: Instance = Arc::new(Counter(7));
    assert!(instance.is::<Counter>());
    assert!(!instance.is::<Foo>());
    assert_eq!(instance.downcast_ref::<Counter>().map(|c| c.0), Some(7));
    let counter = instance.downcast::<Counter>().unwrap();
    assert_eq!(counter.0, 7);
}
