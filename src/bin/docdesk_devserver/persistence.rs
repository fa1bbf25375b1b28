use super::*;

pub(super) fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join("store.json")
}

/// A missing snapshot is an empty bucket.
pub(super) fn load_store(data_dir: &Path) -> Result<Store> {
    let path = store_path(data_dir);
    if !path.exists() {
        return Ok(Store::default());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub(super) fn persist_store(data_dir: &Path, store: &Store) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(store).context("serialize store")?;
    write_atomic_overwrite(&store_path(data_dir), &bytes).context("write store.json")
}

fn write_atomic_overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Applies `f` under the write lock and snapshots the store when it succeeds.
pub(super) async fn mutate<T>(
    state: &AppState,
    f: impl FnOnce(&mut Store) -> Result<T, Rejection>,
) -> Result<T, Response> {
    let mut store = state.store.write().await;
    let out = f(&mut store).map_err(IntoResponse::into_response)?;
    persist_store(&state.data_dir, &store).map_err(internal_error)?;
    Ok(out)
}
