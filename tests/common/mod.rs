#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

pub fn marquee_binary() -> &'static str {
    env!("CARGO_BIN_EXE_marquee")
}

/// Runs marquee commands against an isolated root directory
pub struct MarqueeTest {
    pub temp_dir: TempDir,
}

impl MarqueeTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        MarqueeTest { temp_dir }
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(marquee_binary());
        cmd.env("MARQUEE_ROOT", self.temp_dir.path())
            .env_remove("OMDB_API_KEY")
            .env_remove("MARQUEE_LOG")
            .current_dir(self.temp_dir.path());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute marquee command")
    }

    pub fn run_with_env(&self, args: &[&str], key: &str, value: &str) -> Output {
        self.command()
            .args(args)
            .env(key, value)
            .output()
            .expect("Failed to execute marquee command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("favorites.json")
    }

    pub fn write_favorites(&self, content: &str) {
        let path = self.favorites_path();
        fs::create_dir_all(path.parent().expect("favorites file has a parent"))
            .expect("Failed to create data directory");
        fs::write(path, content).expect("Failed to write favorites");
    }

    pub fn read_favorites(&self) -> String {
        fs::read_to_string(self.favorites_path()).expect("Failed to read favorites")
    }

    /// Point the API at a local server.
    pub fn use_api(&self, base_url: &str) {
        self.run_success(&["config", "set", "api.url", base_url]);
    }
}

/// A local HTTP server answering `responses.len()` requests in order with
/// JSON bodies. Joining the handle yields the request lines it saw.
pub fn serve_json(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let base_url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for body in responses {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("read request");
            seen.push(request_line.trim_end().to_string());
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).expect("read header");
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .expect("write response");
        }
        seen
    });

    (base_url, handle)
}
