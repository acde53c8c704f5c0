//! Integration tests for the `storefront` CLI binary.
//!
//! Argument parsing, help, completions and offline error handling run
//! without a service; product and login flows run against wiremock.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `storefront` binary with env isolation.
///
/// Clears all `STOREFRONT_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn storefront_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("storefront");
    cmd.env("HOME", "/tmp/storefront-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/storefront-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STOREFRONT_PROFILE")
        .env_remove("STOREFRONT_API_URL")
        .env_remove("STOREFRONT_OUTPUT")
        .env_remove("STOREFRONT_INSECURE")
        .env_remove("STOREFRONT_TIMEOUT")
        .env_remove("STOREFRONT_PAGE_SIZE")
        .env_remove("STOREFRONT_EMAIL")
        .env_remove("STOREFRONT_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn product(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": format!("Product {id}"),
        "price": 12.5,
        "category": "shoes"
    })
}

fn products(range: std::ops::Range<usize>) -> Vec<serde_json::Value> {
    range.map(|i| product(&format!("p{i}"))).collect()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = storefront_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    storefront_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("storefront")
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("categories"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn test_version_flag() {
    storefront_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storefront"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    storefront_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    storefront_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storefront"));
}

#[test]
fn test_completions_fish() {
    storefront_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = storefront_cmd().arg("checkout").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized subcommand") || text.contains("invalid"),
        "Expected parse error in output:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = storefront_cmd()
        .args(["--output", "xml", "categories"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("xml"), "Expected rejected value in output:\n{text}");
}

#[test]
fn test_invalid_sort_order() {
    let output = storefront_cmd()
        .args(["products", "--sort", "cheapest"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_pages_conflicts_with_all() {
    let output = storefront_cmd()
        .args(["products", "--pages", "2", "--all"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_products_no_config() {
    let output = storefront_cmd().arg("products").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("No storefront URL configured") || text.contains("config init"),
        "Expected missing-config guidance in output:\n{text}"
    );
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = storefront_cmd()
        .args(["--profile", "staging", "categories"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("staging"), "Expected profile name in output:\n{text}");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    storefront_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path() {
    storefront_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut set = storefront_cmd();
    set.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "api_url", "https://shop.example.com/api"])
        .assert()
        .success();

    let mut show = storefront_cmd();
    show.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://shop.example.com/api"));
}

// ── Service-backed commands ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_json_loads_requested_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": products(0..20),
            "hasMore": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": products(20..25),
            "hasMore": false
        })))
        .mount(&server)
        .await;

    let output = storefront_cmd()
        .args(["--api-url", &server.uri(), "-o", "json", "products", "--pages", "3"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let items: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items.len(), 25);
    assert_eq!(items[0]["name"], "Product p0");
    assert_eq!(items[24]["name"], "Product p24");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_forwards_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("category", "shoes"))
        .and(query_param("sort", "price-asc"))
        .and(query_param("keyword", "runner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": products(0..2),
            "hasMore": false
        })))
        .mount(&server)
        .await;

    storefront_cmd()
        .args([
            "--api-url",
            &server.uri(),
            "-o",
            "plain",
            "products",
            "-c",
            "shoes",
            "-s",
            "price-asc",
            "--keyword",
            "  runner ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("p0").and(predicate::str::contains("p1")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_service_error_exits_general() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "catalog offline" })),
        )
        .mount(&server)
        .await;

    let output = storefront_cmd()
        .args(["--api-url", &server.uri(), "products"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("catalog offline"), "Expected service message:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                { "_id": "c1", "name": "Shoes" },
                { "_id": "c2", "name": "Bags" }
            ]
        })))
        .mount(&server)
        .await;

    storefront_cmd()
        .args(["--api-url", &server.uri(), "-o", "plain", "categories"])
        .assert()
        .success()
        .stdout("Shoes\nBags\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid credentials" })),
        )
        .mount(&server)
        .await;

    let output = storefront_cmd()
        .env("STOREFRONT_PASSWORD", "wrong")
        .args(["--api-url", &server.uri(), "login", "--email", "ada@example.com"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("invalid credentials"), "Expected auth message:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_success_prints_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "_id": "u1", "name": "Ada", "email": "ada@example.com" },
            "token": "tok-123"
        })))
        .mount(&server)
        .await;

    storefront_cmd()
        .env("STOREFRONT_PASSWORD", "hunter2")
        .args(["--api-url", &server.uri(), "login", "--email", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Ada").and(predicate::str::contains("tok-123").not()));
}

#[test]
fn test_connection_refused_exits_connection() {
    let output = storefront_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "--timeout", "5", "categories"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}
