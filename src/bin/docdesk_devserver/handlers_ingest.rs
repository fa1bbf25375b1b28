use docdesk::model::DEFAULT_STATUS_LIMIT;
use docdesk::remote::AskRequest;

use super::*;

const MAX_MATCHES: usize = 5;

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    limit: Option<usize>,
    status: Option<String>,
}

pub(super) async fn list_status(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Value>> {
    let limit = q.limit.unwrap_or(DEFAULT_STATUS_LIMIT);
    Json(state.store.read().await.list_status(limit, q.status.as_deref()))
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentQuery {
    document_id: String,
}

pub(super) async fn file_status(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DocumentQuery>,
) -> Result<Json<Value>, Rejection> {
    state
        .store
        .read()
        .await
        .file_status(&q.document_id)
        .map(Json)
        .ok_or_else(|| Rejection::not_found(format!("document {} not found", q.document_id)))
}

pub(super) async fn sync(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Response> {
    let scope = parse_sync_scope(&body).map_err(IntoResponse::into_response)?;
    let now = now_rfc3339();
    let ids = mutate(&state, |s| s.sync(&scope, &now)).await?;
    tracing::info!(count = ids.len(), "sync processed");
    Ok(Json(json!({
        "message": format!("Sync started for {} document(s)", ids.len()),
        "document_ids": ids,
    })))
}

/// Acknowledged in plain text.
pub(super) async fn wipe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Response {
    let scope = match parse_wipe_scope(&body) {
        Ok(scope) => scope,
        Err(r) => return r.into_response(),
    };
    let now = now_rfc3339();
    match mutate(&state, |s| s.wipe(&scope, &now)).await {
        Ok(ids) => {
            tracing::info!(count = ids.len(), "wipe processed");
            plain_text(StatusCode::OK, &format!("Wipe scheduled for {} document(s)", ids.len()))
        }
        Err(resp) => resp,
    }
}

pub(super) async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<Value>, Rejection> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(Rejection::bad_request("question is required"));
    }
    let matches = state.store.read().await.search(question, MAX_MATCHES);
    Ok(Json(json!({
        "matches": matches,
        "used_url": format!("{}/Neruoforge_RAG", state.public_url),
    })))
}
