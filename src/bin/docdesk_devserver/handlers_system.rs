use super::*;

pub(super) async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(expected) = state.token.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented != Some(expected) {
        return unauthorized();
    }
    next.run(req).await
}

pub(super) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

/// File routes carry the caller's identity; both halves must be present.
pub(super) fn require_identity(user_id: &str, user_role: &str) -> Result<(), Rejection> {
    if user_id.trim().is_empty() || user_role.trim().is_empty() {
        return Err(Rejection::bad_request("user_id and user_role are required"));
    }
    Ok(())
}
