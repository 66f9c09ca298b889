use collector::kernel::config::load_document;
use collector::registry::{ServiceKey, ServiceKind};
use collector::{build_registry, features, input_factories, output_factories};
use std::fs;
use tempfile::tempdir;

#[test]
fn built_in_kinds_are_registered() {
    assert_eq!(input_factories().types(), vec!["file"]);
    assert_eq!(output_factories().types(), vec!["stdout"]);
    assert!(features::is_enabled("file"));
    assert!(!features::is_enabled("kafka"));
}

#[test]
fn builds_from_a_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("collector.toml");
    fs::write(
        &path,
        r#"
[inputs.syslog]
type = "file"
path = "/var/log/syslog"

[inputs.broken]
type = "socket"

[outputs.console]
type = "stdout"
format = "json"
"#,
    )?;

    let registry = build_registry(&load_document(Some(&path))?);

    let messages: Vec<&str> = registry.error_messages().collect();
    assert_eq!(messages, vec![r#"Unknown input type "socket" for broken"#]);
    assert!(!registry.is_valid());
    assert!(registry.services().contains(&ServiceKey::new(ServiceKind::Input, "syslog")));
    assert!(registry.services().contains(&ServiceKey::new(ServiceKind::Output, "console")));
    assert_eq!(registry.summary().services(), 2);
    Ok(())
}

#[test]
fn yaml_documents_work_too() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("collector.yaml");
    fs::write(
        &path,
        "inputs:\n  app:\n    type: file\n    path: /tmp/app.log\n    reader-interval: 250\noutputs:\n  console:\n    type: stdout\n",
    )?;

    let registry = build_registry(&load_document(Some(&path))?);
    assert!(registry.is_valid(), "{:?}", registry.errors());
    assert_eq!(registry.inputs().len(), 1);
    Ok(())
}

#[test]
fn missing_outputs_section_is_structural() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("collector.toml");
    fs::write(&path, "[inputs.syslog]\ntype = \"file\"\npath = \"/var/log/syslog\"\n")?;

    let registry = build_registry(&load_document(Some(&path))?);
    assert_eq!(registry.errors().len(), 1);
    assert!(registry.services().is_empty());
    Ok(())
}
