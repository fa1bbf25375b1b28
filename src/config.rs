use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{DashboardConfig, DeskConfig, Identity, RemoteConfig};

const HOME_DIR: &str = ".docdesk";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "docdesk.log";

pub const ENV_TOKEN: &str = "DOCDESK_TOKEN";
pub const ENV_USER_ID: &str = "DOCDESK_USER_ID";
pub const ENV_USER_ROLE: &str = "DOCDESK_USER_ROLE";

/// The `.docdesk` directory holding configuration and the console log.
#[derive(Clone, Debug)]
pub struct DeskHome {
    pub root: PathBuf,
    dir: PathBuf,
}

impl DeskHome {
    pub fn home_dir(root: &Path) -> PathBuf {
        root.join(HOME_DIR)
    }

    pub fn init(root: &Path, cfg: &DeskConfig, force: bool) -> Result<Self> {
        let dir = Self::home_dir(root);
        if dir.join(CONFIG_FILE).exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to overwrite)",
                HOME_DIR,
                dir.display()
            ));
        }
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let home = Self {
            root: root.to_path_buf(),
            dir,
        };
        home.write_config(cfg)?;
        Ok(home)
    }

    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            let home = Self::home_dir(dir);
            if home.join(CONFIG_FILE).is_file() {
                return Ok(Self {
                    root: dir.to_path_buf(),
                    dir: home,
                });
            }
        }
        Err(anyhow!("No {} directory found (run `docdesk init`)", HOME_DIR))
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Reads the stored config without environment overrides.
    pub fn read_config(&self) -> Result<DeskConfig> {
        let path = self.config_path();
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let cfg: DeskConfig =
            serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    /// Reads the stored config and applies `DOCDESK_*` overrides.
    pub fn load_config(&self) -> Result<DeskConfig> {
        let cfg = self.read_config()?;
        Ok(apply_env_overrides(cfg, |k| std::env::var(k).ok()))
    }

    pub fn write_config(&self, cfg: &DeskConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.config_path(), &bytes).context("write config.json")?;
        Ok(())
    }
}

pub fn new_config(remote: RemoteConfig, identity: Option<Identity>) -> DeskConfig {
    DeskConfig {
        version: 1,
        remote,
        identity,
        dashboard: DashboardConfig::default(),
    }
}

/// Environment values win over the file. A user id alone gets the `user` role.
pub fn apply_env_overrides(
    mut cfg: DeskConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> DeskConfig {
    if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
        cfg.remote.token = Some(token);
    }
    let user_id = lookup(ENV_USER_ID).filter(|v| !v.is_empty());
    let user_role = lookup(ENV_USER_ROLE).filter(|v| !v.is_empty());
    match (user_id, user_role, cfg.identity.as_mut()) {
        (Some(id), role, Some(identity)) => {
            identity.user_id = id;
            if let Some(role) = role {
                identity.user_role = role;
            }
        }
        (Some(id), role, None) => {
            cfg.identity = Some(Identity {
                user_id: id,
                user_role: role.unwrap_or_else(|| "user".to_string()),
            });
        }
        (None, Some(role), Some(identity)) => identity.user_role = role,
        (None, _, _) => {}
    }
    cfg
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
