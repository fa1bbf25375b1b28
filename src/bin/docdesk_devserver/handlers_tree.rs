use docdesk::remote::{
    CreateFileRequest, CreateFolderPayload, DeleteFileRequest, DeleteFolderPayload, FolderRequest,
    RenameFileRequest, RenameFolderPayload,
};

use super::*;

pub(super) async fn get_tree(State(state): State<Arc<AppState>>) -> Json<Vec<Value>> {
    Json(state.store.read().await.tree())
}

fn payload<P: serde::de::DeserializeOwned>(raw: Value) -> Result<P, Response> {
    serde_json::from_value(raw)
        .map_err(|e| Rejection::bad_request(format!("invalid payload: {}", e)).into_response())
}

/// One endpoint for all folder actions, dispatched on `action`.
pub(super) async fn folder_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderRequest<Value>>,
) -> Result<Json<Value>, Response> {
    if req.bucket != state.bucket {
        return Err(Rejection::bad_request(format!("unknown bucket {}", req.bucket)).into_response());
    }

    match req.action.as_str() {
        "createFolder" => {
            let p: CreateFolderPayload = payload(req.payload)?;
            let path = mutate(&state, |s| s.create_folder(&p.path, &p.folder_name)).await?;
            Ok(Json(json!({"message": "Folder created", "path": path})))
        }
        "renameFolder" => {
            let p: RenameFolderPayload = payload(req.payload)?;
            let moved = mutate(&state, |s| s.rename_folder(&p.old_path, &p.new_path)).await?;
            Ok(Json(json!({"message": "Folder renamed", "moved": moved})))
        }
        "deleteFolder" => {
            let p: DeleteFolderPayload = payload(req.payload)?;
            let deleted = mutate(&state, |s| s.delete_folder(&p.folder_path)).await?;
            Ok(Json(json!({"message": "Folder deleted", "deleted": deleted})))
        }
        other => Err(Rejection::bad_request(format!("unknown action {}", other)).into_response()),
    }
}

pub(super) async fn create_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFileRequest>,
) -> Result<Json<Value>, Response> {
    require_identity(&req.user_id, &req.user_role).map_err(IntoResponse::into_response)?;
    let key = mutate(&state, |s| s.create_file(&req.key, &req.file_type)).await?;
    Ok(Json(json!({"message": "File created", "key": key})))
}

pub(super) async fn rename_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<Value>, Response> {
    require_identity(&req.user_id, &req.user_role).map_err(IntoResponse::into_response)?;
    let key = mutate(&state, |s| s.rename_file(&req.old_key, &req.new_key)).await?;
    Ok(Json(json!({"message": "File renamed", "key": key})))
}

pub(super) async fn delete_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteFileRequest>,
) -> Result<Json<Value>, Response> {
    require_identity(&req.user_id, &req.user_role).map_err(IntoResponse::into_response)?;
    mutate(&state, |s| s.delete_file(&req.key)).await?;
    Ok(Json(json!({"message": "File deleted"})))
}
