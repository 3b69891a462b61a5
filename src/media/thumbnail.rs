use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Edge length of generated previews (square bound)
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 96;

/// Why a preview could not be generated
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("thumbnail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Decoded preview ready for display
#[derive(Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Completion of a preview job, tagged with the selection entry it was made for
#[derive(Debug, Clone)]
pub struct ThumbnailResult {
    pub id: u64,
    /// `Err` holds a display string so the message stays `Clone`
    pub thumbnail: Result<Thumbnail, String>,
}

/// Generate a preview off the UI thread
pub async fn load_thumbnail(id: u64, path: PathBuf, size: u32) -> ThumbnailResult {
    let result = tokio::task::spawn_blocking(move || generate_thumbnail(&path, size))
        .await
        .map_err(ThumbnailError::from)
        .and_then(|inner| inner);

    ThumbnailResult {
        id,
        thumbnail: result.map_err(|e| e.to_string()),
    }
}

/// Read, decode and shrink an image to fit `size` x `size`
pub fn generate_thumbnail(path: &Path, size: u32) -> Result<Thumbnail, ThumbnailError> {
    let data = std::fs::read(path).map_err(|source| ThumbnailError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&data).map_err(|source| ThumbnailError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let thumbnail = img.resize(size, size, FilterType::Lanczos3).to_rgba8();

    tracing::debug!(
        "📸 Generated thumbnail {}x{} for {}",
        thumbnail.width(),
        thumbnail.height(),
        path.display()
    );

    Ok(Thumbnail {
        width: thumbnail.width(),
        height: thumbnail.height(),
        pixels: thumbnail.into_raw(),
    })
}
