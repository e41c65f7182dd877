//! Shared helpers for the CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::Predicate;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Temporary home for one CLI invocation
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap()
    }

    /// The binary, isolated from the user's config and environment
    pub fn pagesum(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("pagesum").unwrap();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("HOME", self.path())
            .env_remove("PAGESUM_BASE_URL")
            .env_remove("PAGESUM_TOKEN")
            .env_remove("PAGESUM_TIMEOUT_MS")
            .env_remove("RUST_LOG");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert_eq!(run.code, Some(0), "expected success\n{}", run.describe());
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert_ne!(run.code, Some(0), "expected failure\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    fn describe(&self) -> String {
        format!(
            "code: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.code, self.stdout, self.stderr
        )
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "{}", self.describe());
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicates::str::contains(needle).eval(self.stdout.as_str()),
            "stdout missing {:?}\n{}",
            needle,
            self.describe()
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}\n{}",
            needle,
            self.describe()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicates::str::contains(needle).eval(self.stderr.as_str()),
            "stderr missing {:?}\n{}",
            needle,
            self.describe()
        );
        self
    }
}

/// Canned reply for one request line prefix, e.g. `"POST /api_tools/input_data"`
#[derive(Clone)]
pub struct Reply {
    pub route: String,
    pub status: &'static str,
    pub body: String,
}

pub fn reply(route: &str, status: &'static str, body: &str) -> Reply {
    Reply {
        route: route.to_string(),
        status,
        body: body.to_string(),
    }
}

/// Local stand-in for the object store service
///
/// Every connection carries one request. Unmatched routes answer 404.
/// A request is recorded before its reply is written.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/api_tools", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve(stream, &replies, &seen);
            }
        });

        Self { base_url, requests }
    }

    /// Default replies for a successful run
    pub fn healthy() -> Self {
        Self::start(vec![
            reply("POST /api_tools/input_data", "200 OK", r#"{"status":"ok"}"#),
            reply("POST /api_tools/apply_prompt", "200 OK", r#"{"status":"ok"}"#),
            reply(
                "GET /api_tools/return_data/",
                "200 OK",
                r#"{"text_value":"Stub summary of the page."}"#,
            ),
            reply("DELETE /api_tools/objects/", "200 OK", r#"{"deleted":true}"#),
        ])
    }

    /// Raw requests received so far, head and body
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request lines received so far, e.g. `"GET /api_tools/return_data/x"`
    pub fn request_lines(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.lines().next())
            .map(|line| line.trim_end_matches(" HTTP/1.1").to_string())
            .collect()
    }
}

fn serve(stream: TcpStream, replies: &[Reply], seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        head.push_str(&line);
        if line == "\r\n" {
            break;
        }
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    let request = format!("{}{}", head, String::from_utf8_lossy(&body));
    seen.lock().unwrap().push(request);

    let (status, payload) = replies
        .iter()
        .find(|r| head.starts_with(&r.route))
        .map(|r| (r.status, r.body.as_str()))
        .unwrap_or(("404 Not Found", "{}"));

    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let _ = stream.flush();
}
