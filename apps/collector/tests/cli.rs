use clap::Parser;
use collector_app::{Cli, run};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tempfile::tempdir;

fn invoke(args: &[&str]) -> (anyhow::Result<ExitCode>, String, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = run(&cli, &mut out, &mut err);
    (code, String::from_utf8_lossy(&out).into_owned(), String::from_utf8_lossy(&err).into_owned())
}

fn write(dir: &Path, body: &str) -> String {
    let path = dir.join("collector.toml");
    fs::write(&path, body).expect("write document");
    path.display().to_string()
}

#[test]
fn check_prints_summary_for_valid_documents() {
    let dir = tempdir().expect("tempdir");
    let path = write(
        dir.path(),
        "[inputs.syslog]\ntype = \"file\"\npath = \"/var/log/syslog\"\n\n[outputs.console]\ntype = \"stdout\"\n",
    );

    let (code, out, err) = invoke(&["collector", "--config", &path, "--check"]);
    assert_eq!(code.expect("run succeeds"), ExitCode::SUCCESS);
    assert_eq!(out.trim(), "Configuration OK: 1 input(s), 1 output(s), 0 error(s)");
    assert!(err.is_empty());
}

#[test]
fn invalid_documents_print_every_error() {
    let dir = tempdir().expect("tempdir");
    let path = write(
        dir.path(),
        "[inputs.a]\ntype = \"socket\"\n\n[outputs.b]\nformat = \"json\"\n",
    );

    let (code, out, err) = invoke(&["collector", "-c", &path]);
    assert_eq!(code.expect("run succeeds"), ExitCode::FAILURE);
    assert!(out.is_empty());

    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines.len(), 2, "{err}");
    assert_eq!(lines[0], r#"Unknown input type "socket" for a"#);
    assert_eq!(lines[1], r#"Missing type field for b ({format = "json"})"#);
}

#[test]
fn missing_document_is_an_error() {
    let (code, _, _) = invoke(&["collector", "--config", "/definitely/not/here.toml"]);
    let err = code.expect_err("missing file must fail");
    assert!(err.to_string().contains("Configuration document could not be loaded"));
}

#[test]
fn log_level_is_parsed() {
    let cli = Cli::try_parse_from(["collector", "--log-level", "debug", "--json"]).expect("arguments parse");
    assert_eq!(cli.log_level, collector_logger::LevelFilter::DEBUG);
    assert!(cli.json);
    assert!(Cli::try_parse_from(["collector", "--log-level", "loud"]).is_err());
}
