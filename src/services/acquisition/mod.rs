// Image acquisition: camera or photo library, behind one picker boundary

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::core::errors::AcquireResult;
use crate::core::types::{CapturedImage, SourceKind};
use crate::utils::image_ops::decode_rgba_async;

/// An image as delivered by the platform picker: encoded bytes in whatever
/// common format the platform produced.
#[derive(Debug, Clone)]
pub struct PickedImage {
    pub bytes: Vec<u8>,
}

/// Platform boundary for obtaining a raw image.
///
/// Resolves exactly once per invocation: `Some` with the encoded bytes, or
/// `None` when the user cancelled the picker.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self, kind: SourceKind) -> AcquireResult<Option<PickedImage>>;
}

/// Abstracts "camera" vs "existing image library" as the two ways to obtain
/// an image, and normalizes whatever the picker yields into one in-memory
/// RGBA bitmap.
///
/// Authorization preconditions and single-acquisition serialization live in
/// the pipeline controller, which owns the state those rules depend on.
pub struct ImageSource {
    picker: Arc<dyn ImagePicker>,
}

impl ImageSource {
    pub fn new(picker: Arc<dyn ImagePicker>) -> Self {
        Self { picker }
    }

    /// Run the picker and decode its output. `Ok(None)` means the user
    /// cancelled; the caller must leave existing state untouched.
    pub async fn acquire(&self, kind: SourceKind) -> AcquireResult<Option<CapturedImage>> {
        let picked = match self.picker.pick(kind).await? {
            Some(picked) => picked,
            None => {
                debug!(?kind, "image acquisition cancelled by user");
                return Ok(None);
            }
        };

        let image = decode_rgba_async(picked.bytes).await?;
        debug!(
            ?kind,
            width = image.width,
            height = image.height,
            "image acquired"
        );
        Ok(Some(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AcquireError;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    struct FixedPicker {
        result: Option<Vec<u8>>,
    }

    #[async_trait]
    impl ImagePicker for FixedPicker {
        async fn pick(&self, _kind: SourceKind) -> AcquireResult<Option<PickedImage>> {
            Ok(self.result.clone().map(|bytes| PickedImage { bytes }))
        }
    }

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encoding");
        bytes
    }

    #[tokio::test]
    async fn test_acquire_decodes_picked_bytes() {
        let source = ImageSource::new(Arc::new(FixedPicker {
            result: Some(encoded_png(4, 4)),
        }));
        let image = source.acquire(SourceKind::Library).await.unwrap().unwrap();
        assert_eq!((image.width, image.height), (4, 4));
        assert!(image.is_readable());
    }

    #[tokio::test]
    async fn test_cancelled_pick_yields_none() {
        let source = ImageSource::new(Arc::new(FixedPicker { result: None }));
        assert!(source.acquire(SourceKind::Camera).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_bytes_surface_as_error() {
        let source = ImageSource::new(Arc::new(FixedPicker {
            result: Some(b"not an image".to_vec()),
        }));
        let err = source.acquire(SourceKind::Library).await.unwrap_err();
        assert!(matches!(err, AcquireError::UnreadableImage(_)));
    }
}
