//! Failed summarize runs

use crate::prelude::*;

#[test]
fn unreachable_store_fails_ingest() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", "http://127.0.0.1:1/api_tools")
        .env("PAGESUM_TIMEOUT_MS", "2000")
        .fails()
        .code_is(1)
        .stdout_has("Summary: Error: Failed to fetch webpage: ");
}

#[test]
fn ingest_error_detail_is_shown() {
    let temp = Project::empty();
    let server = StubServer::start(vec![reply(
        "POST /api_tools/input_data",
        "500 Internal Server Error",
        r#"{"detail":"boom"}"#,
    )]);

    temp.pagesum()
        .args(&["summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .fails()
        .code_is(1)
        .stdout_has("Summary: Error: Failed to fetch webpage: 500 - boom\n")
        .stderr_has("failed");

    assert_eq!(server.request_lines(), vec!["POST /api_tools/input_data"]);
}

#[test]
fn transform_failure_without_detail() {
    let temp = Project::empty();
    let server = StubServer::start(vec![
        reply("POST /api_tools/input_data", "200 OK", r#"{"status":"ok"}"#),
        reply("POST /api_tools/apply_prompt", "502 Bad Gateway", "{}"),
    ]);

    temp.pagesum()
        .args(&["summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .fails()
        .stdout_has("Summary: Error: Failed to generate summary: 502 - Unknown error\n");
}

#[test]
fn cleanup_after_failure_deletes_partial_objects() {
    let temp = Project::empty();
    let server = StubServer::start(vec![
        reply("POST /api_tools/input_data", "200 OK", r#"{"status":"ok"}"#),
        reply("POST /api_tools/apply_prompt", "500 Internal Server Error", "{}"),
        reply("DELETE /api_tools/objects/", "200 OK", "{}"),
    ]);

    temp.pagesum()
        .args(&["summarize", "https://example.com", "--cleanup"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .fails()
        .stdout_has("  webpage_content ok\n")
        .stdout_lacks("webpage_summary ok");

    assert_eq!(
        server.request_lines().last().map(String::as_str),
        Some("DELETE /api_tools/objects/webpage_content")
    );
}
