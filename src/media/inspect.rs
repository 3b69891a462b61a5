/// File metadata for picked photos
///
/// The declared media type comes from the file extension, the way a browser
/// fills in `File.type`. Content is not sniffed here.

use image::ImageFormat;
use std::path::{Path, PathBuf};

use crate::form::FileInfo;

/// Media type used when the extension says nothing
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Declared media type for a path, from its extension
pub fn media_type(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string())
}

/// Collect name, type and size for every picked path
///
/// Paths whose metadata cannot be read are skipped with a warning.
pub async fn inspect_files(paths: Vec<PathBuf>) -> Vec<FileInfo> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("⚠️  Cannot read {}: {}", path.display(), e);
                continue;
            }
        };

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        files.push(FileInfo {
            name,
            media_type: media_type(&path),
            size: metadata.len(),
            path,
        });
    }

    files
}
