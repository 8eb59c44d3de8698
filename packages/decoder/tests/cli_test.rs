//! Tests for the `markup-decoder` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn decoder_cmd() -> Command {
    let mut cmd = Command::cargo_bin("markup-decoder").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_shows_registrations() {
    decoder_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("http"))
        .stdout(predicate::str::contains("https"))
        .stdout(predicate::str::contains("html"));
}

#[test]
fn test_query_unknown_scheme() {
    decoder_cmd()
        .args(["query", "ftp://example.org/page", "h1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Source scheme 'ftp' does not match a registered source",
        ));
}

#[test]
fn test_query_unknown_kind() {
    decoder_cmd()
        .args(["query", "https://example.org", "h1", "--kind", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parser for 'xml' not found"));
}

#[test]
fn test_query_invalid_uri() {
    decoder_cmd()
        .args(["query", "not a uri", "h1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse source URI"));
}

// The binary blocks this thread, so the server needs its own workers.
#[tokio::test(flavor = "multi_thread")]
async fn test_query_against_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ul><li><a href="/a">Alpha</a></li><li><a href="/b">Beta</a></li></ul>"#,
        ))
        .mount(&mock_server)
        .await;

    let uri = format!("{}/list", mock_server.uri());

    decoder_cmd()
        .args(["query", &uri, "ul li"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AlphaBeta"));

    decoder_cmd()
        .args(["query", &uri, "li a/href", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""/a""#))
        .stdout(predicate::str::contains(r#""/b""#))
        .stdout(predicate::str::contains(r#""selector": "li a/href""#));

    decoder_cmd()
        .args(["query", &uri, "table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Selector 'table' matched no elements"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_respects_size_limit_from_env() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>".repeat(100)))
        .mount(&mock_server)
        .await;

    let uri = format!("{}/big", mock_server.uri());

    decoder_cmd()
        .env("MARKUP_DECODER_MAX_RESPONSE_SIZE", "32")
        .args(["query", &uri, "p"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeding the limit of 32 bytes"));
}
