use std::{io::Write, process::Command};

use exprun::Event;
use tempfile::NamedTempFile;

fn program_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", source).unwrap();
    file
}

fn exprun() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_exprun"));
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_direct_mode_prints_output_then_value() {
    let program = program_file("x = 4 * 5\nprint x\nx + 1\n");
    let output = exprun().arg(program.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "20.0\n21.0\n");
}

#[test]
fn test_direct_mode_reports_error_and_prints_none() {
    let program = program_file("print 1\nprint z\n");
    let output = exprun().arg(program.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1.0\nNone\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Runtime Error: Undefined variable 'z'."));
    assert!(stderr.contains("Line 2   | print z"));
}

#[test]
fn test_stream_mode_with_seed() {
    let program = program_file("print rate * 2\nassert rate > 1\n");
    let seed = program_file(r#"{"rate": 0.5}"#);
    let output = exprun()
        .arg("--stream")
        .arg("--seed")
        .arg(seed.path())
        .arg(program.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let events: Vec<Event> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let labels: Vec<&str> = events.iter().map(Event::label).collect();
    assert_eq!(labels, vec!["stdout", "runtime_error", "env_snapshot"]);
    assert_eq!(events[0], Event::Stdout("1.0".to_string()));
}

#[test]
fn test_missing_config_fails() {
    let program = program_file("1\n");
    let output = exprun()
        .arg("--config")
        .arg("/no/such/config.json")
        .arg(program.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read config file"));
}
