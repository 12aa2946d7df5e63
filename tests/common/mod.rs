use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const OWNER: &str = "462d67f8-b232-4da4-a7de-0c86dd667d3f";
pub const TOKEN: &str = "test-token";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let dir = tmp.path().join("work");
        fs::create_dir_all(&dir).expect("create work dir");

        Self {
            _tmp: tmp,
            home,
            dir,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("regent");
        cmd.env("HOME", &self.home)
            .env_remove("REGENT_HOST")
            .env_remove("REGENT_ENDPOINT")
            .env_remove("REGENT_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `regent policy --owner-id OWNER --policy-base-url <base> --token TOKEN ...`
    pub fn policy(&self, base_url: &str, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["policy", "--owner-id", OWNER, "--policy-base-url", base_url])
            .args(["--token", TOKEN])
            .args(args);
        cmd
    }

    /// `regent --host <host> --token TOKEN namespace ...`
    pub fn namespace(&self, host: &str, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--host", host, "--token", TOKEN, "namespace"])
            .args(args);
        cmd
    }

    pub fn policy_json(&self, base_url: &str, args: &[&str]) -> Value {
        let out = self
            .policy(base_url, args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write(&self, name: &str, body: &str) -> String {
        let path = self.dir.join(name);
        fs::write(&path, body).expect("write fixture file");
        path.to_str().expect("fixture path utf8").to_string()
    }
}

pub fn policy_fixture(id: &str, name: &str, content: &str, active: bool) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "context": "config",
        "content": content,
        "active": active,
        "created_at": "2022-03-14T09:30:00Z",
        "modified_at": "2022-03-15T11:00:00Z"
    })
}
