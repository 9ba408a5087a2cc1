//! End-to-end tests driving the `rb` binary.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

fn rb_binary() -> String {
    env!("CARGO_BIN_EXE_rb").to_string()
}

/// Writes a config file pointing the rest log into `dir`.
fn write_config(dir: &Path, extra: &str) -> NamedTempFile {
    let log_path = dir.join("data.txt");
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, r#"log_path = "{}""#, log_path.display()).unwrap();
    writeln!(config_file, "{extra}").unwrap();
    config_file.flush().unwrap();
    config_file
}

/// Runs `rb` isolated from the user's own config and environment.
fn rb(home: &Path, config: &Path, args: &[&str]) -> Output {
    rb_with_env(home, config, &[], args)
}

/// Like [`rb`], with extra environment variables set for the child.
fn rb_with_env(home: &Path, config: &Path, env: &[(&str, &OsStr)], args: &[&str]) -> Output {
    Command::new(rb_binary())
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("RUST_LOG")
        .envs(env.iter().copied())
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run rb")
}

#[test]
fn test_no_subcommand_prints_help() {
    let output = Command::new(rb_binary()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: rb"));
    assert!(stdout.contains("history"));
}

#[cfg(unix)]
#[test]
fn test_idle_prints_command_output() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "idle_command = \"echo\"\nidle_args = [\"31337\"]");

    let output = rb(temp.path(), config.path(), &["idle"]);
    assert!(
        output.status.success(),
        "rb idle should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "31337\n");
}

#[cfg(unix)]
#[test]
fn test_idle_rejects_non_integer_output() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "idle_command = \"echo\"\nidle_args = [\"soon\"]");

    let output = rb(temp.path(), config.path(), &["idle"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected milliseconds"), "stderr: {stderr}");
}

#[test]
fn test_history_reads_rest_log() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("data.txt"), "181\n240\n").unwrap();
    let config = write_config(temp.path(), "");

    let output = rb(temp.path(), config.path(), &["history", "--json"]);
    assert!(
        output.status.success(),
        "rb history should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entries"], serde_json::json!([181, 240]));
    assert_eq!(value["summary"]["entries"], 2);
    assert_eq!(value["summary"]["max_busy_ticks"], 240);
}

#[test]
fn test_run_fails_fast_without_idle_command() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "idle_command = \"rb-no-such-idle-program\"");

    let output = rb(temp.path(), config.path(), &["run"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("indicator: nominal (green-led.png)"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rb-no-such-idle-program"), "stderr: {stderr}");
    // The log is created on startup even though nothing was recorded
    assert_eq!(std::fs::read_to_string(temp.path().join("data.txt")).unwrap(), "");
}

#[test]
fn test_run_rejects_zero_thresholds() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "[long_break]\nmax_busy_ticks = 0\nbreak_idle_secs = 300",
    );

    let output = rb(temp.path(), config.path(), &["run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_busy_ticks must be greater than zero"), "stderr: {stderr}");
}

#[test]
fn test_env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("data.txt"), "181\n").unwrap();
    let env_log = temp.path().join("env.txt");
    std::fs::write(&env_log, "9\n").unwrap();
    let config = write_config(temp.path(), "");

    let env = [("RB_LOG_PATH", env_log.as_os_str())];
    let output = rb_with_env(temp.path(), config.path(), &env, &["history", "--json"]);
    assert!(
        output.status.success(),
        "rb history should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], env_log.display().to_string());
    assert_eq!(value["entries"], serde_json::json!([9]));
}

#[test]
fn test_env_overrides_nested_policy_keys() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "[short_break]\nmax_busy_ticks = 180\nbreak_idle_secs = 30",
    );

    let env = [("RB_SHORT_BREAK__MAX_BUSY_TICKS", OsStr::new("0"))];
    let output = rb_with_env(temp.path(), config.path(), &env, &["run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_busy_ticks must be greater than zero"), "stderr: {stderr}");
}
