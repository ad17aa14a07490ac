//! Document I/O operations

use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save a document.
///
/// The bytes go to a sibling `*.part` file first which is renamed over
/// `path` once complete, so a failed run never leaves a truncated PDF behind.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let part = part_path(&path)?;

    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, UnbookletError>(writer)
    })
    .await??;

    if let Err(e) = write_and_rename(&part, &path, &bytes).await {
        if let Err(cleanup) = tokio::fs::remove_file(&part).await {
            log::debug!("Could not remove {}: {}", part.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}

async fn write_and_rename(part: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(part, bytes).await?;
    tokio::fs::rename(part, path).await?;
    Ok(())
}

/// `out.pdf` -> `out.pdf.part`
fn part_path(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(UnbookletError::Config(format!(
            "Output path {} has no file name",
            path.display()
        )));
    };
    let mut part_name = name.to_os_string();
    part_name.push(".part");
    Ok(path.with_file_name(part_name))
}
