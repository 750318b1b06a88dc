//! Loading of everything that lives outside the binary: shader sources,
//! texture images and the meshes built from the primitive tables.

use std::path::Path;

use anyhow::Context as _;

pub mod mesh;
pub mod texture;
pub mod texture_library;

pub async fn load_string(root: &Path, file_name: &str) -> anyhow::Result<String> {
    let path = root.join(file_name);
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

pub async fn load_binary(root: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = root.join(file_name);
    tokio::fs::read(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}
