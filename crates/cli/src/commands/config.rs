// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config command

use pagesum_core::Config;

/// Print the effective configuration with the token redacted
pub fn show(config: &Config) {
    println!("base_url: {}", config.base_url);
    println!(
        "token: {}",
        if config.token.is_some() { "<set>" } else { "<unset>" }
    );
    match config.timeout {
        Some(timeout) => println!("timeout: {}ms", timeout.as_millis()),
        None => println!("timeout: none"),
    }
    println!("scope_object_names: {}", config.scope_object_names);
    println!("prompt: {}", config.prompt);
}
