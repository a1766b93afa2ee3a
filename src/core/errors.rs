// Error types for the capture-to-translation pipeline
//
// One enum per stage, thiserror throughout. Precondition violations
// (acquiring via camera without authorization, translating empty text) get
// their own loud variants instead of silently no-opping, so integration bugs
// surface during development.

use thiserror::Error;

/// Image acquisition errors
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("camera acquisition requires granted authorization")]
    PermissionRequired,

    #[error("an acquisition is already in progress")]
    AcquisitionInProgress,

    #[error("picked image could not be decoded: {0}")]
    UnreadableImage(#[from] image::ImageError),

    #[error("image picker failed: {0}")]
    PickerFailed(String),

    #[error("image decode task failed: {0}")]
    TaskJoinFailed(String),
}

/// Text recognition errors
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no image has been acquired")]
    NoImage,

    #[error("image buffer is unreadable ({width}x{height}, {bytes} bytes)")]
    UnreadableImage { width: u32, height: u32, bytes: usize },

    #[error("text detector failed: {0}")]
    DetectorFailed(String),
}

/// Translation errors
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("nothing has been recognized yet")]
    NothingRecognized,

    #[error("refusing to translate empty text")]
    EmptyText,

    #[error("a translation is already in flight")]
    TranslationInFlight,

    #[error("no shared translator has been installed")]
    NotConfigured,

    #[error("no API key configured for the translation service")]
    MissingApiKey,

    #[error("translation service unavailable (failing fast after repeated errors)")]
    ServiceUnavailable,

    #[error("translation request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("invalid response from translation service: {0}")]
    InvalidResponse(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no recognition languages configured")]
    NoLanguages,

    #[error("invalid language tag: {0:?}")]
    InvalidLanguageTag(String),

    #[error("translation timeout must be > 0 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("failure threshold must be > 0, got {0}")]
    InvalidFailureThreshold(usize),

    #[error("cooldown must be > 0 seconds, got {0}")]
    InvalidCooldown(u64),
}

/// Any stage failure, for callers that want a single error type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("acquisition failed: {0}")]
    Acquire(#[from] AcquireError),

    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("configuration invalid: {0}")]
    Config(#[from] ConfigError),
}

// Convenience type aliases for Results
pub type AcquireResult<T> = Result<T, AcquireError>;
pub type RecognitionResult<T> = Result<T, RecognitionError>;
pub type TranslationResult<T> = Result<T, TranslationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
