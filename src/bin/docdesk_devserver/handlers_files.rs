use docdesk::remote::UploadRequest;

use super::*;

#[derive(Debug, Deserialize)]
pub(super) struct KeyQuery {
    key: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    user_role: String,
}

/// Upload failures come back as plain text, not JSON.
pub(super) async fn upload(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> Response {
    if let Err(r) = require_identity(&req.user_id, &req.user_role) {
        return plain_text(r.status, &r.message);
    }
    let now = now_rfc3339();
    let mut store = state.store.write().await;
    let key = match store.upload(&req.key, &req.content, &now) {
        Ok(key) => key,
        Err(r) => return plain_text(r.status, &r.message),
    };
    if let Err(err) = persist_store(&state.data_dir, &store) {
        return internal_error(err);
    }
    tracing::info!(key = %key, "uploaded");
    Json(json!({"message": "File uploaded", "key": key})).into_response()
}

/// Answers in the gateway shape: the payload is a JSON string under `body`.
pub(super) async fn read_file(
    State(state): State<Arc<AppState>>,
    Query(q): Query<KeyQuery>,
) -> Result<Json<Value>, Response> {
    require_identity(&q.user_id, &q.user_role).map_err(IntoResponse::into_response)?;
    let bytes = state
        .store
        .read()
        .await
        .read(&q.key)
        .map_err(IntoResponse::into_response)?;
    let inner = json!({
        "status": "success",
        "content": String::from_utf8_lossy(&bytes),
    });
    Ok(Json(json!({ "body": inner.to_string() })))
}

pub(super) async fn download_url(
    State(state): State<Arc<AppState>>,
    Query(q): Query<KeyQuery>,
) -> Result<Json<Value>, Response> {
    require_identity(&q.user_id, &q.user_role).map_err(IntoResponse::into_response)?;
    if !state.store.read().await.contains_file(&q.key) {
        return Err(Rejection::not_found(format!("file {} not found", q.key)).into_response());
    }
    let url = format!(
        "{}/file/raw?key={}",
        state.public_url,
        normalize_key(&q.key).replace(' ', "%20")
    );
    Ok(Json(json!({"status": "success", "download_url": url})))
}

#[derive(Debug, Deserialize)]
pub(super) struct RawQuery {
    key: String,
}

/// Target of the links handed out by `download_url`.
pub(super) async fn raw_file(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RawQuery>,
) -> Result<Vec<u8>, Response> {
    state
        .store
        .read()
        .await
        .read(&q.key)
        .map_err(IntoResponse::into_response)
}
