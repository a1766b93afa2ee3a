// Library exports for the capture-to-translation pipeline
//
// Acquire an image (camera or library, permission-gated), recognize its
// text, translate it. Each stage is user-triggered; the controller owns all
// shared state. This is a library with no entry point of its own: a
// presentation layer drives the controller and renders its snapshots.

// Core modules
pub mod core;
pub mod orchestration;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions
pub use crate::core::{
    config::{Config, RecognitionConfig, TranslationConfig, DEFAULT_RECOGNITION_LANGUAGES},
    errors::{
        AcquireError, ConfigError, PipelineError, RecognitionError, TranslationError,
    },
    types::{
        AcquireOutcome, AuthorizationState, CapturedImage, DeviceAuthorization, PipelineState,
        RecognizeOutcome, RecognizedText, SourceKind, TranslateOutcome, TranslatedText,
    },
};

pub use crate::orchestration::PipelineController;

pub use crate::services::{
    acquisition::{ImagePicker, ImageSource, PickedImage},
    permission::{CameraAuthorizer, PermissionGate},
    recognition::{DetectedLine, RecognitionEngine, TextCandidate, TextDetector},
    translation::{install_shared, shared, HttpTranslator, Translator},
};

pub use crate::utils::{decode_rgba_async, Metrics, MetricsSnapshot};
