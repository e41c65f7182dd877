//! Config command specs

use crate::prelude::*;

#[test]
fn defaults_without_config_file() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["config"])
        .passes()
        .stdout_has("base_url: https://builder.impromptu-labs.com/api_tools\n")
        .stdout_has("token: <unset>\n")
        .stdout_has("scope_object_names: false\n");
}

#[test]
fn env_overrides_file() {
    let temp = Project::empty();
    temp.file(
        "pagesum.toml",
        "base_url = \"http://file.example/api\"\ntimeout = \"5s\"\n",
    );
    temp.pagesum()
        .args(&["--config", "pagesum.toml", "config"])
        .env("PAGESUM_BASE_URL", "http://env.example/api")
        .passes()
        .stdout_has("base_url: http://env.example/api\n")
        .stdout_has("timeout: 5000ms\n");
}

#[test]
fn token_is_never_printed() {
    let temp = Project::empty();
    temp.pagesum()
        .args(&["config"])
        .env("PAGESUM_TOKEN", "super-secret-token")
        .passes()
        .stdout_has("token: <set>\n")
        .stdout_lacks("super-secret-token");
}

#[test]
fn default_config_location_is_read() {
    let temp = Project::empty();
    temp.file(
        "config/pagesum/config.toml",
        "scope_object_names = true\n",
    );
    temp.pagesum()
        .args(&["config"])
        .passes()
        .stdout_has("scope_object_names: true\n");
}
