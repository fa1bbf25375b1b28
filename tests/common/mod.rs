#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use docdesk::model::{Identity, RemoteConfig};
use docdesk::remote::RemoteClient;

pub const BUCKET: &str = "docdesk-test";

pub struct ServerGuard {
    pub base_url: String,
    pub token: Option<String>,
    pub data_dir: PathBuf,
    _tempdir: Option<tempfile::TempDir>,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl ServerGuard {
    pub fn remote_config(&self) -> RemoteConfig {
        let mut remote = RemoteConfig::single(&self.base_url, BUCKET);
        remote.token = self.token.clone();
        remote.timeout_secs = Some(10);
        remote
    }

    pub fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(self.remote_config()).context("create remote client")
    }
}

pub fn identity() -> Identity {
    Identity::new("tester", "admin")
}

/// Fresh devserver with its own data dir and no token.
pub fn spawn_server() -> Result<ServerGuard> {
    let tempdir = tempfile::tempdir().context("create server tempdir")?;
    let data_dir = tempdir.path().to_path_buf();
    spawn(&data_dir, None, Some(tempdir))
}

pub fn spawn_server_with_token(token: &str) -> Result<ServerGuard> {
    let tempdir = tempfile::tempdir().context("create server tempdir")?;
    let data_dir = tempdir.path().to_path_buf();
    spawn(&data_dir, Some(token), Some(tempdir))
}

/// Devserver over an existing data dir, for restart checks.
pub fn spawn_server_in(data_dir: &Path) -> Result<ServerGuard> {
    spawn(data_dir, None, None)
}

fn spawn(
    data_dir: &Path,
    token: Option<&str>,
    tempdir: Option<tempfile::TempDir>,
) -> Result<ServerGuard> {
    let addr_file = data_dir.join(format!("addr-{}.txt", std::process::id()));
    let _ = std::fs::remove_file(&addr_file);

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docdesk-devserver"));
    cmd.args([
        "--addr",
        "127.0.0.1:0",
        "--addr-file",
        addr_file.to_str().unwrap(),
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--bucket",
        BUCKET,
    ]);
    if let Some(token) = token {
        cmd.args(["--token", token]);
    }
    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn docdesk-devserver")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        token: token.map(str::to_string),
        data_dir: data_dir.to_path_buf(),
        _tempdir: tempdir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Runs the CLI in `dir` with the identity env overrides cleared.
pub fn run_docdesk_raw(dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_docdesk"))
        .args(args)
        .current_dir(dir)
        .env_remove("DOCDESK_TOKEN")
        .env_remove("DOCDESK_USER_ID")
        .env_remove("DOCDESK_USER_ROLE")
        .output()
        .with_context(|| format!("run docdesk {:?}", args))
}

pub fn run_docdesk(dir: &Path, args: &[&str]) -> Result<String> {
    let out = run_docdesk_raw(dir, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "docdesk {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}
