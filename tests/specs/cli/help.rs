//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["--help"])
        .passes()
        .stdout_has("summarize")
        .stdout_has("config");
}

#[test]
fn summarize_help_lists_flags() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["summarize", "--help"])
        .passes()
        .stdout_has("--cleanup")
        .stdout_has("--show-log")
        .stdout_has("--raw")
        .stdout_has("--log-json");
}
