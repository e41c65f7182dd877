//! Successful summarize runs against a local stub store

use crate::prelude::*;

#[test]
fn prints_summary_after_three_calls() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes()
        .stdout_has("URL: https://example.com\n")
        .stdout_has("Summary: Stub summary of the page.\n")
        .stdout_lacks("API Call Logs")
        .stderr_has("[100%] completed");

    assert_eq!(
        server.request_lines(),
        vec![
            "POST /api_tools/input_data",
            "POST /api_tools/apply_prompt",
            "GET /api_tools/return_data/webpage_summary",
        ]
    );
}

#[test]
fn ingest_and_prompt_payloads() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com/article"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes();

    let requests = server.requests();
    assert!(requests[0].contains(r#""created_object_name":"webpage_content""#));
    assert!(requests[0].contains(r#""data_type":"urls""#));
    assert!(requests[0].contains(r#""input_data":["https://example.com/article"]"#));
    assert!(requests[1].contains(r#""created_object_names":["webpage_summary"]"#));
    assert!(requests[1].contains("{webpage_content}"));
}

#[test]
fn token_sent_as_bearer() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .env("PAGESUM_TOKEN", "tok-42")
        .passes();

    for request in server.requests() {
        assert!(
            request.to_ascii_lowercase().contains("authorization: bearer tok-42"),
            "{}",
            request
        );
    }
}

#[test]
fn show_log_and_raw() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com", "--show-log", "--raw"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes()
        .stdout_has("Raw API Response:")
        .stdout_has("API Call Logs:")
        .stdout_has("POST /input_data")
        .stdout_has("POST /apply_prompt")
        .stdout_has("GET /return_data/webpage_summary");
}

#[test]
fn cleanup_deletes_both_objects() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com", "--cleanup"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes()
        .stdout_has("Summary: Objects deleted successfully")
        .stdout_has("  webpage_content ok\n")
        .stdout_has("  webpage_summary ok\n");

    let lines = server.request_lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "DELETE /api_tools/objects/webpage_content");
    assert_eq!(lines[4], "DELETE /api_tools/objects/webpage_summary");
}

#[test]
fn log_json_exports_every_call() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com", "--log-json", "calls.jsonl"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes();

    let log = temp.read("calls.jsonl");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(r#""endpoint":"/input_data""#));
    assert!(lines[2].contains(r#""endpoint":"/return_data/webpage_summary""#));
}

#[test]
fn json_format() {
    let temp = Project::empty();
    let server = StubServer::healthy();

    temp.pagesum()
        .args(&["summarize", "https://example.com", "--format", "json"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes()
        .stdout_has(r#""phase": "completed""#)
        .stdout_has(r#""result_text": "Stub summary of the page.""#);
}

#[test]
fn scoped_names_from_config() {
    let temp = Project::empty();
    let server = StubServer::healthy();
    temp.file("pagesum.toml", "scope_object_names = true\n");

    temp.pagesum()
        .args(&["--config", "pagesum.toml", "summarize", "https://example.com"])
        .env("PAGESUM_BASE_URL", &server.base_url)
        .passes();

    let lines = server.request_lines();
    assert!(lines[2].starts_with("GET /api_tools/return_data/webpage_summary_"));
}
