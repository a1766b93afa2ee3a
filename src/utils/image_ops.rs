use crate::core::errors::{AcquireError, AcquireResult};
use crate::core::types::CapturedImage;

/// Asynchronously decode encoded image bytes into one normalized RGBA8
/// bitmap using spawn_blocking to avoid blocking the async runtime.
///
/// Pickers hand over whatever encoding the platform produced (PNG, JPEG,
/// WebP, ...); everything downstream sees a single in-memory format.
pub async fn decode_rgba_async(bytes: Vec<u8>) -> AcquireResult<CapturedImage> {
    tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(CapturedImage::new(width, height, rgba.into_raw()))
    })
    .await
    .map_err(|e| AcquireError::TaskJoinFailed(e.to_string()))?
}
