//! Argument and input error specs

use crate::prelude::*;

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.pagesum().args(&[]).fails().code_is(2);
}

#[test]
fn blank_url_is_rejected() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["summarize", ""])
        .fails()
        .code_is(1)
        .stderr_has("Please enter a URL");
}

#[test]
fn whitespace_url_is_rejected() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["summarize", "   "])
        .fails()
        .stderr_has("Please enter a URL");
}

#[test]
fn missing_config_file_fails() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["--config", "nope.toml", "config"])
        .fails()
        .stderr_has("nope.toml");
}

#[test]
fn unknown_config_key_fails() {
    let temp = Project::empty();
    temp.file("bad.toml", "base_urll = \"http://localhost\"\n");
    temp.pagesum()
        .args(&["--config", "bad.toml", "config"])
        .fails()
        .stderr_has("base_urll");
}

#[test]
fn bad_timeout_env_fails() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["config"])
        .env("PAGESUM_TIMEOUT_MS", "soon")
        .fails()
        .stderr_has("PAGESUM_TIMEOUT_MS");
}
