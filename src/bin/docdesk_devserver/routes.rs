use super::*;

/// Every bucket route; `/healthz` stays outside the bearer check.
pub(super) fn app_router(state: Arc<AppState>) -> Router {
    let authed = Router::new()
        .route("/get-s3-tree", get(get_tree))
        .route("/Folder_Handler", post(folder_handler))
        .route("/File_Create_file", post(create_file))
        .route("/File_Rename_file", post(rename_file))
        .route("/File_Delete_file", post(delete_file))
        .route("/file/upload", post(upload))
        .route("/file/read", get(read_file))
        .route("/file/download-url", get(download_url))
        .route("/file/raw", get(raw_file))
        .route("/status/list", get(list_status))
        .route("/filestatus_DB/Get", get(file_status))
        .route("/NeuroSync", post(sync))
        .route("/NeuroWipe", post(wipe))
        .route("/Neruoforge_RAG", post(ask))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(authed)
        .with_state(state)
}
