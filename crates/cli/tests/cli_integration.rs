use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &str = r#"{
  "name": "app",
  "flags": [
    { "name": "log-level", "env": ["APP_LOG_LEVEL", "LOG_LEVEL"] }
  ],
  "commands": [{
    "name": "serve",
    "flags": [
      { "name": "workers", "kind": "int", "env": ["APP_WORKERS"] },
      { "name": "server-host" }
    ],
    "positional": [
      { "name": "port", "kind": "int", "env": ["APP_PORT"] }
    ]
  }]
}"#;

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("argsource-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn argsource() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_argsource"));
    for var in ["APP_LOG_LEVEL", "LOG_LEVEL", "APP_WORKERS", "APP_PORT", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(out: &Output) -> serde_json::Value {
    assert!(
        out.status.success(),
        "argsource failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    serde_json::from_slice(&out.stdout).expect("stdout is not JSON")
}

#[test]
fn help_works() {
    let out = argsource()
        .arg("--help")
        .output()
        .expect("failed to run argsource --help");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("resolve") && stdout.contains("keys"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn keys_prints_lookup_forms() {
    let out = argsource()
        .args(["keys", "a-b-c"])
        .output()
        .expect("failed to run argsource keys");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("underscore: a_b_c"), "{stdout}");
    assert!(stdout.contains("camel:      aBC"), "{stdout}");
    assert!(stdout.contains("path:       a / b / c"), "{stdout}");
}

#[test]
fn resolve_layers_environment_over_config() {
    let dir = make_temp_dir("layers");
    let schema = write(&dir, "schema.json", SCHEMA);
    let config = write(
        &dir,
        "config.json",
        r#"{ "logLevel": "warn", "workers": 2, "server": { "host": "0.0.0.0" } }"#,
    );

    let out = argsource()
        .arg("resolve")
        .arg("--schema")
        .arg(&schema)
        .arg("--config")
        .arg(dir.join("missing.json"))
        .arg("--config")
        .arg(&config)
        .arg("serve")
        .env("LOG_LEVEL", "debug")
        .env("APP_PORT", "8080")
        .output()
        .expect("failed to run argsource resolve");
    let values = stdout_json(&out);

    assert_eq!(values["log-level"], "debug");
    assert_eq!(values["workers"], 2);
    assert_eq!(values["server-host"], "0.0.0.0");
    assert_eq!(values["port"], 8080);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn resolve_reads_env_file() {
    let dir = make_temp_dir("dotenv");
    let schema = write(&dir, "schema.json", SCHEMA);
    let env_file = write(&dir, ".env", "APP_WORKERS=7\nAPP_PORT=9000\n");

    let out = argsource()
        .arg("resolve")
        .arg("--schema")
        .arg(&schema)
        .arg("--env-file")
        .arg(&env_file)
        .arg("serve")
        .env("APP_PORT", "9100")
        .output()
        .expect("failed to run argsource resolve");
    let values = stdout_json(&out);

    assert_eq!(values["workers"], 7);
    // Variables already set in the process win over the dotenv file.
    assert_eq!(values["port"], 9100);
    assert!(values["log-level"].is_null());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_positional_env_names_the_variable() {
    let dir = make_temp_dir("bad-env");
    let schema = write(&dir, "schema.json", SCHEMA);

    let out = argsource()
        .arg("resolve")
        .arg("--schema")
        .arg(&schema)
        .arg("serve")
        .env("APP_PORT", "eighty")
        .output()
        .expect("failed to run argsource resolve");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains(r#"APP_PORT="eighty""#), "{stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strict_rejects_unknown_keys() {
    let dir = make_temp_dir("strict");
    let schema = write(&dir, "schema.json", SCHEMA);
    let config = write(&dir, "config.json", r#"{ "log_level": "info", "colour": true }"#);

    let lenient = argsource()
        .arg("resolve")
        .arg("--schema")
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run argsource resolve");
    assert_eq!(stdout_json(&lenient)["log-level"], "info");

    let strict = argsource()
        .arg("resolve")
        .arg("--strict")
        .arg("--schema")
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run argsource resolve");
    assert!(!strict.status.success());
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("unknown configuration key 'colour'"), "{stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_config_fails() {
    let dir = make_temp_dir("malformed");
    let schema = write(&dir, "schema.json", SCHEMA);
    let config = write(&dir, "config.json", "{ not json");

    let out = argsource()
        .arg("resolve")
        .arg("--schema")
        .arg(&schema)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run argsource resolve");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to decode configuration document"), "{stderr}");

    let _ = fs::remove_dir_all(&dir);
}
