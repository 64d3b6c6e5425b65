use std::path::PathBuf;

/// Returns the workspace root directory.
fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(|parent| parent.to_path_buf())
        .unwrap_or(manifest_dir)
}

/// Returns the path to a shared fixture under `test_resources/`.
pub fn test_resource_path(name: &str) -> PathBuf {
    workspace_root().join("test_resources").join(name)
}
