mod common;

use anyhow::{Context, Result};
use serde_json::{Value, json};

#[test]
fn devserver_route_registration_smoke() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let health: Value = client
        .get(format!("{}/healthz", guard.base_url))
        .send()
        .context("GET /healthz")?
        .json()
        .context("parse healthz")?;
    assert_eq!(health["status"], "ok");

    let tree: Value = client
        .get(format!("{}/get-s3-tree", guard.base_url))
        .send()
        .context("GET /get-s3-tree")?
        .json()
        .context("parse tree")?;
    assert_eq!(tree, json!([]));

    let missing = client
        .get(format!("{}/definitely-not-a-route", guard.base_url))
        .send()
        .context("GET unknown route")?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[test]
fn token_guards_everything_but_healthz() -> Result<()> {
    let guard = common::spawn_server_with_token("secret")?;
    let client = reqwest::blocking::Client::new();

    let unauth = client
        .get(format!("{}/get-s3-tree", guard.base_url))
        .send()
        .context("GET tree without auth")?;
    assert_eq!(unauth.status(), reqwest::StatusCode::UNAUTHORIZED);

    let wrong = client
        .get(format!("{}/get-s3-tree", guard.base_url))
        .header(reqwest::header::AUTHORIZATION, common::auth_header("nope"))
        .send()
        .context("GET tree with wrong token")?;
    assert_eq!(wrong.status(), reqwest::StatusCode::UNAUTHORIZED);

    let ok = client
        .get(format!("{}/get-s3-tree", guard.base_url))
        .header(reqwest::header::AUTHORIZATION, common::auth_header("secret"))
        .send()
        .context("GET tree with auth")?;
    assert!(ok.status().is_success());

    Ok(())
}

#[test]
fn folder_handler_checks_bucket_and_action() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();
    let url = format!("{}/Folder_Handler", guard.base_url);

    let wrong_bucket = client
        .post(&url)
        .json(&json!({
            "action": "createFolder",
            "bucket": "other",
            "payload": {"path": "", "folderName": "x"},
        }))
        .send()
        .context("POST wrong bucket")?;
    assert_eq!(wrong_bucket.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = wrong_bucket.json()?;
    assert_eq!(body["message"], "unknown bucket other");

    let unknown = client
        .post(&url)
        .json(&json!({"action": "explode", "bucket": common::BUCKET, "payload": {}}))
        .send()
        .context("POST unknown action")?;
    assert_eq!(unknown.status(), reqwest::StatusCode::BAD_REQUEST);

    Ok(())
}

#[test]
fn read_answers_in_gateway_shape_and_wipe_in_plain_text() -> Result<()> {
    let guard = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    let upload = client
        .post(format!("{}/file/upload", guard.base_url))
        .json(&json!({
            "key": "/notes/a.txt",
            "content": "aGVsbG8=",
            "user_id": "u",
            "user_role": "r",
        }))
        .send()
        .context("POST upload")?;
    assert!(upload.status().is_success());

    let read: Value = client
        .get(format!("{}/file/read", guard.base_url))
        .query(&[("key", "notes/a.txt"), ("user_id", "u"), ("user_role", "r")])
        .send()
        .context("GET read")?
        .json()?;
    let inner: Value = serde_json::from_str(read["body"].as_str().unwrap())?;
    assert_eq!(inner, json!({"status": "success", "content": "hello"}));

    let bad_upload = client
        .post(format!("{}/file/upload", guard.base_url))
        .json(&json!({"key": "b.txt", "content": "!!", "user_id": "u", "user_role": "r"}))
        .send()
        .context("POST bad upload")?;
    assert_eq!(bad_upload.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(bad_upload.text()?, "content is not valid base64");

    let wipe = client
        .post(format!("{}/NeuroWipe", guard.base_url))
        .json(&json!({"document_id": "ALL"}))
        .send()
        .context("POST wipe")?;
    assert!(wipe.status().is_success());
    assert_eq!(wipe.text()?, "Wipe scheduled for 0 document(s)");

    Ok(())
}
