use super::*;

fn sample() -> DeskConfig {
    new_config(
        RemoteConfig::single("http://127.0.0.1:9", "docs"),
        Some(Identity::new("ana", "editor")),
    )
}

#[test]
fn init_then_discover_from_nested_dir() -> Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    DeskHome::init(dir.path(), &sample(), false)?;
    let nested = dir.path().join("a/b");
    fs::create_dir_all(&nested).context("create nested")?;

    let home = DeskHome::discover(&nested)?;
    let cfg = home.read_config()?;
    assert_eq!(cfg.remote.bucket, "docs");
    assert_eq!(cfg.dashboard.status_limit, 1000);
    assert_eq!(cfg.dashboard.activity_limit, 25);
    Ok(())
}

#[test]
fn init_refuses_to_overwrite_without_force() -> Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    DeskHome::init(dir.path(), &sample(), false)?;
    assert!(DeskHome::init(dir.path(), &sample(), false).is_err());
    assert!(DeskHome::init(dir.path(), &sample(), true).is_ok());
    Ok(())
}

#[test]
fn env_overrides_token_and_identity() {
    let cfg = apply_env_overrides(sample(), |k| match k {
        ENV_TOKEN => Some("secret".to_string()),
        ENV_USER_ID => Some("bo".to_string()),
        _ => None,
    });
    assert_eq!(cfg.remote.token.as_deref(), Some("secret"));
    assert_eq!(cfg.identity, Some(Identity::new("bo", "editor")));
}

#[test]
fn env_user_id_without_stored_identity_defaults_role() {
    let mut base = sample();
    base.identity = None;
    let cfg = apply_env_overrides(base, |k| (k == ENV_USER_ID).then(|| "cy".to_string()));
    assert_eq!(cfg.identity, Some(Identity::new("cy", "user")));
}

#[test]
fn missing_dashboard_section_uses_defaults() -> Result<()> {
    let raw = r#"{"version":1,"remote":{"tree_url":"a","api_url":"b","bucket":"c"}}"#;
    let cfg: DeskConfig = serde_json::from_str(raw).context("parse")?;
    assert_eq!(cfg.dashboard.status_limit, crate::model::DEFAULT_STATUS_LIMIT);
    assert!(cfg.identity.is_none());
    Ok(())
}
