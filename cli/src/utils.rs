use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Every `*.json` file directly under `dir`, sorted by name.
pub(crate) fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Could not read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Creates `dir`, emptying it first when `clear` is set.
pub(crate) fn init_dir(dir: &Path, clear: bool) -> anyhow::Result<()> {
    if clear && dir.exists() {
        log::debug!("Clearing {}", dir.display());
        fs::remove_dir_all(dir).with_context(|| format!("Could not clear {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))
}
