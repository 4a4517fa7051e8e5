//! Startup behaviour of the binary, checked before the loop is entered.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dnsimple-ddns"))
        .args(args)
        .env_remove("DDNS_CONFIG")
        .env_remove("DDNS_TOKEN")
        .env_remove("DDNS_DOMAIN")
        .env_remove("DDNS_NAME")
        .output()
        .expect("failed to run dnsimple-ddns")
}

#[test]
fn test_help_exits_cleanly() {
    let output = run(&["-h"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--token"));
    assert!(stdout.contains("--domain"));
    assert!(stdout.contains("--name"));
}

#[test]
fn test_missing_token_is_fatal() {
    let output = run(&[
        "-c",
        "/nonexistent/dnsimple-ddns.toml",
        "-d",
        "example.com",
        "-n",
        "home",
        "-t",
        "",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-t, -d and -n must be set"));
}

#[test]
fn test_missing_entry_is_fatal() {
    let output = run(&[
        "-c",
        "/nonexistent/dnsimple-ddns.toml",
        "-t",
        "token",
        "-d",
        "example.com",
    ]);

    assert!(!output.status.success());
}

#[test]
fn test_malformed_frequency_is_rejected() {
    let output = run(&["-f", "soon", "-t", "token", "-d", "example.com", "-n", "home"]);

    assert!(!output.status.success());
}
