use collector_registry::config::{Config, File, FileFormat};
use collector_registry::{ConfigurationRegistry, InputFactories, OutputFactories, ServiceKey};
use collector_stdout::{StdoutOutputFactory, TYPE};

fn registry(outputs: &str) -> ConfigurationRegistry {
    let json = format!(r#"{{ "inputs": {{}}, "outputs": {outputs} }}"#);
    let document = Config::builder().add_source(File::from_str(&json, FileFormat::Json)).build().expect("document");
    let mut factories = OutputFactories::new();
    factories.register(TYPE, StdoutOutputFactory).expect("fresh map");
    ConfigurationRegistry::new(&document, &InputFactories::new(), &factories)
}

#[test]
fn builds_output_services() {
    let registry = registry(r#"{ "console": { "type": "stdout", "format": "json" }, "debug": { "type": "stdout" } }"#);
    assert!(registry.is_valid(), "{:?}", registry.errors());
    assert_eq!(registry.outputs().len(), 2);
    assert!(registry.services().contains(&ServiceKey::output("console")));
}

#[test]
fn bad_format_is_recorded_against_the_entry() {
    let registry = registry(r#"{ "console": { "type": "stdout", "format": "yaml" } }"#);
    let messages: Vec<&str> = registry.error_messages().collect();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("[console] "), "{}", messages[0]);
}
