// Pipeline controller: the single owner of capture-to-translation state

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::core::config::Config;
use crate::core::errors::{
    AcquireError, AcquireResult, RecognitionError, RecognitionResult, TranslationError,
    TranslationResult,
};
use crate::core::types::{
    AcquireOutcome, AuthorizationState, PipelineState, RecognizeOutcome, SourceKind,
    TranslateOutcome,
};
use crate::services::acquisition::{ImagePicker, ImageSource};
use crate::services::permission::{CameraAuthorizer, PermissionGate};
use crate::services::recognition::{RecognitionEngine, TextDetector};
use crate::services::translation::Translator;
use crate::utils::metrics::Metrics;

/// Coordinates the three user-triggered stages (acquire, recognize,
/// translate) and the permission gate in front of camera acquisition.
///
/// The controller is the only component that mutates `PipelineState`. The
/// state sits behind a lock that is never held across a suspension point,
/// so a stage awaiting its completion never blocks other user actions, and
/// readers always observe a fully consistent snapshot.
///
/// Recognition and translation completions are correlated to the image they
/// were started against through the state's generation tag; a completion
/// arriving after the image changed is discarded as `Superseded` rather
/// than committed.
pub struct PipelineController {
    state: RwLock<PipelineState>,
    gate: PermissionGate,
    source: ImageSource,
    engine: RecognitionEngine,
    translator: Arc<dyn Translator>,
    metrics: Metrics,
}

impl PipelineController {
    pub fn new(
        config: &Config,
        authorizer: Arc<dyn CameraAuthorizer>,
        picker: Arc<dyn ImagePicker>,
        detector: Arc<dyn TextDetector>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        info!(
            languages = config.recognition.languages.len(),
            target = %config.translation.target_language,
            "pipeline controller initialized"
        );
        Self {
            state: RwLock::new(PipelineState::new()),
            gate: PermissionGate::new(authorizer),
            source: ImageSource::new(picker),
            engine: RecognitionEngine::new(detector, &config.recognition),
            translator,
            metrics: Metrics::new(),
        }
    }

    /// Current state for presentation. The image is shared, not copied.
    pub fn snapshot(&self) -> PipelineState {
        self.state.read().clone()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Resolve camera authorization, prompting if the OS has not asked yet,
    /// and record the result in the pipeline state.
    #[instrument(skip(self))]
    pub async fn check_and_request_permission(&self) -> AuthorizationState {
        let outcome = self.gate.check_and_request().await;
        self.state.write().set_authorization(outcome);
        debug!(?outcome, "authorization state updated");
        outcome
    }

    /// Acquire an image from the camera or the photo library.
    ///
    /// Camera acquisition requires granted authorization and fails before
    /// the picker is consulted otherwise. Only one acquisition may be
    /// outstanding; a second call is rejected, not queued. Cancellation
    /// returns `Cancelled` and leaves the existing state untouched. On
    /// success the new image replaces any previous one and clears all
    /// derived text (cascading invalidation).
    #[instrument(skip(self))]
    pub async fn acquire(&self, kind: SourceKind) -> AcquireResult<AcquireOutcome> {
        {
            let mut st = self.state.write();
            if kind == SourceKind::Camera
                && st.authorization() != AuthorizationState::Granted
            {
                warn!("camera acquisition attempted without authorization");
                return Err(AcquireError::PermissionRequired);
            }
            if st.acquisition_in_flight() {
                return Err(AcquireError::AcquisitionInProgress);
            }
            st.set_acquisition_in_flight(true);
        }

        let result = self.source.acquire(kind).await;

        let mut st = self.state.write();
        st.set_acquisition_in_flight(false);
        match result {
            Ok(Some(image)) => {
                st.install_image(image);
                self.metrics.record_acquisition();
                debug!(generation = st.generation(), "image installed");
                Ok(AcquireOutcome::Acquired)
            }
            Ok(None) => {
                self.metrics.record_acquisition_cancelled();
                Ok(AcquireOutcome::Cancelled)
            }
            Err(e) => {
                self.metrics.record_acquisition_failed();
                Err(e)
            }
        }
    }

    /// Recognize text in the currently held image.
    ///
    /// Requires an image. If the image is replaced while recognition is
    /// outstanding, the late result is discarded and `Superseded` is
    /// returned; on failure recognized text stays absent. An image with no
    /// text commits a present-but-empty result.
    #[instrument(skip(self))]
    pub async fn recognize(&self) -> RecognitionResult<RecognizeOutcome> {
        let (image, generation) = {
            let st = self.state.read();
            let image = match st.image() {
                Some(image) => Arc::clone(image),
                None => return Err(RecognitionError::NoImage),
            };
            (image, st.generation())
        };

        let result = self.engine.recognize(&image).await;

        let mut st = self.state.write();
        match result {
            Ok(text) => {
                if st.generation() != generation {
                    debug!(
                        started = generation,
                        current = st.generation(),
                        "discarding stale recognition result"
                    );
                    self.metrics.record_stale_completion();
                    return Ok(RecognizeOutcome::Superseded);
                }
                self.metrics.record_recognition(text.is_empty());
                st.set_recognized(text.clone());
                Ok(RecognizeOutcome::Recognized(text))
            }
            Err(e) => {
                self.metrics.record_recognition_failed();
                Err(e)
            }
        }
    }

    /// Translate the recognized text through the injected translator.
    ///
    /// Preconditions are loud: nothing recognized, empty recognized text,
    /// and an already in-flight translation are all distinct errors; the
    /// second call is rejected, never queued behind the first. Starting a
    /// translation hides the previous result; success commits the new text
    /// and reveals it; failure leaves the previous text in place.
    #[instrument(skip(self))]
    pub async fn translate(&self) -> TranslationResult<TranslateOutcome> {
        let (text, generation) = {
            let mut st = self.state.write();
            let recognized = match st.recognized() {
                Some(recognized) => recognized,
                None => return Err(TranslationError::NothingRecognized),
            };
            if recognized.is_empty() {
                return Err(TranslationError::EmptyText);
            }
            let text = recognized.merged();
            if st.translation_in_flight() {
                return Err(TranslationError::TranslationInFlight);
            }
            st.set_translation_in_flight(true);
            st.hide_translation();
            (text, st.generation())
        };

        let result = self.translator.translate(&text).await;

        let mut st = self.state.write();
        st.set_translation_in_flight(false);
        match result {
            Ok(translated) => {
                if st.generation() != generation {
                    debug!(
                        started = generation,
                        current = st.generation(),
                        "discarding stale translation result"
                    );
                    self.metrics.record_stale_completion();
                    return Ok(TranslateOutcome::Superseded);
                }
                self.metrics.record_translation();
                st.set_translated(translated.clone());
                Ok(TranslateOutcome::Translated(translated))
            }
            Err(e) => {
                self.metrics.record_translation_failed();
                Err(e)
            }
        }
    }

    /// Restart the flow: drop the image and all derived text. Outstanding
    /// completions of the old flow are invalidated by the generation bump.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        self.state.write().reset();
        debug!("pipeline state reset");
    }
}
