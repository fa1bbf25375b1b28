use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use docdesk::model::ALL_SENTINEL;

#[path = "docdesk_devserver/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "docdesk_devserver/store.rs"]
mod store;
use self::store::*;
#[path = "docdesk_devserver/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "docdesk_devserver/handlers_system.rs"]
mod handlers_system;
use self::handlers_system::*;
#[path = "docdesk_devserver/handlers_tree.rs"]
mod handlers_tree;
use self::handlers_tree::*;
#[path = "docdesk_devserver/handlers_files.rs"]
mod handlers_files;
use self::handlers_files::*;
#[path = "docdesk_devserver/handlers_ingest.rs"]
mod handlers_ingest;
use self::handlers_ingest::*;
#[path = "docdesk_devserver/routes.rs"]
mod routes;
#[path = "docdesk_devserver/runtime.rs"]
mod runtime;

struct AppState {
    bucket: String,

    /// When set, every route except `/healthz` requires this bearer token.
    token: Option<String>,

    data_dir: PathBuf,

    /// Base URL handed out in download links.
    public_url: String,

    store: RwLock<Store>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
