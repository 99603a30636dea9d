use serial_test::serial;
use std::process::{Command, Output};

fn run_bot(envs: &[(&str, &str)], args: &[&str]) -> Output {
    // Run from a directory without a .env file
    let temp_dir = std::env::temp_dir().join("dota_mmr_bot_test");
    std::fs::create_dir_all(&temp_dir).ok();

    let mut command = Command::new(env!("CARGO_BIN_EXE_dota-mmr-bot"));
    command
        .current_dir(&temp_dir)
        .env_clear()
        .env("PATH", std::env::var("PATH").unwrap_or_default())
        .args(args);

    for (key, value) in envs {
        command.env(key, value);
    }

    command.output().expect("Failed to execute bot")
}

/// Test that the application refuses to start without a bot token
#[test]
#[serial]
fn test_application_exits_on_missing_token() {
    let output = run_bot(&[("CONNECTION_STRING", "host=localhost")], &[]);

    assert!(!output.status.success(), "Process should fail without API_TOKEN");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--api-token"), "Should report missing token. Got: {}", stderr);
}

/// Test that the application requires a database unless running in memory
#[test]
#[serial]
fn test_application_exits_on_missing_connection_string() {
    let output = run_bot(&[("API_TOKEN", "123:abc")], &[]);

    assert!(!output.status.success(), "Process should fail without CONNECTION_STRING");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--connection-string"),
        "Should report missing connection string. Got: {}",
        stderr
    );
}

/// Test that the application exits with error code when database connection fails
#[test]
#[serial]
fn test_application_exits_on_connection_failure() {
    let output = run_bot(
        &[
            ("API_TOKEN", "123:abc"),
            (
                "CONNECTION_STRING",
                "host=127.0.0.1 port=1 user=postgres password=wrong dbname=nonexistent connect_timeout=2"
            ),
            ("RUST_LOG", "error")
        ],
        &[]
    );

    assert!(!output.status.success(), "Process should fail with invalid connection");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to connect to database"),
        "Should log connection error. Got: {}",
        stderr
    );
    assert!(
        stderr.contains("Application cannot start"),
        "Should log clear message about startup failure. Got: {}",
        stderr
    );
}
