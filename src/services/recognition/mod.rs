// Text recognition: detector boundary plus the merging adapter

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::config::RecognitionConfig;
use crate::core::errors::{RecognitionError, RecognitionResult};
use crate::core::types::{CapturedImage, RecognizedText};

/// One candidate reading of a detected line.
#[derive(Debug, Clone)]
pub struct TextCandidate {
    pub text: String,
    /// Detector confidence in [0, 1].
    pub confidence: f32,
}

/// One detected text line, candidates ranked best-first by the detector.
#[derive(Debug, Clone)]
pub struct DetectedLine {
    pub candidates: Vec<TextCandidate>,
}

impl DetectedLine {
    pub fn single(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            candidates: vec![TextCandidate {
                text: text.into(),
                confidence,
            }],
        }
    }
}

/// Detector boundary.
///
/// Lines come back in the order the detector reports them (top-to-bottom,
/// left-to-right reading order); that ordering is the detector's guarantee.
/// The detector auto-detects the script per line; `languages` is a hint
/// list, order irrelevant.
#[async_trait]
pub trait TextDetector: Send + Sync {
    async fn detect(
        &self,
        image: &CapturedImage,
        languages: &[String],
    ) -> RecognitionResult<Vec<DetectedLine>>;
}

/// Produces a `RecognizedText` from one image: runs the detector, keeps each
/// line's top candidate, and preserves detector order.
pub struct RecognitionEngine {
    detector: Arc<dyn TextDetector>,
    languages: Vec<String>,
    // One request at a time; concurrent callers queue here.
    serial: tokio::sync::Mutex<()>,
}

impl RecognitionEngine {
    pub fn new(detector: Arc<dyn TextDetector>, config: &RecognitionConfig) -> Self {
        Self {
            detector,
            languages: config.languages.clone(),
            serial: tokio::sync::Mutex::new(()),
        }
    }

    /// Recognize text in `image`.
    ///
    /// An image with no detectable text yields a present-but-empty result;
    /// only an unreadable buffer or a detector failure is an error. Lower
    /// ranked candidates are discarded (top-1 policy).
    pub async fn recognize(&self, image: &CapturedImage) -> RecognitionResult<RecognizedText> {
        if !image.is_readable() {
            return Err(RecognitionError::UnreadableImage {
                width: image.width,
                height: image.height,
                bytes: image.pixels.len(),
            });
        }

        let _serial = self.serial.lock().await;
        let lines = self.detector.detect(image, &self.languages).await?;

        let mut merged = Vec::with_capacity(lines.len());
        for line in lines {
            let top = match line.candidates.into_iter().next() {
                Some(candidate) => candidate,
                None => {
                    warn!("detector reported a line with no candidates, skipping");
                    continue;
                }
            };
            if !(0.0..=1.0).contains(&top.confidence) {
                warn!(
                    confidence = top.confidence,
                    "detector confidence outside [0, 1]"
                );
            }
            debug!(confidence = top.confidence, "line recognized");
            merged.push(top.text);
        }

        Ok(RecognizedText::from_lines(merged))
    }
}
