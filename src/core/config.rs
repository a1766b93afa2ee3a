use crate::core::errors::ConfigError;
use std::env;
use std::time::Duration;
use tracing::Level;

/// Languages requested from the text detector when nothing is configured.
/// Covers Latin, Cyrillic, and CJK scripts; the detector auto-detects per
/// line, so order is irrelevant.
pub const DEFAULT_RECOGNITION_LANGUAGES: [&str; 10] =
    ["en", "ru", "es", "fr", "de", "it", "pt", "zh", "ja", "ko"];

/// Recognition configuration
#[derive(Debug, Clone)]
pub struct RecognitionConfig {
    /// Language hints passed through to the detector, two-letter or BCP-47.
    pub languages: Vec<String>,
}

/// Translation service configuration
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Process-wide target language; not selectable per call.
    pub target_language: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// Consecutive failures before the client starts failing fast.
    pub failure_threshold: usize,
    /// How long the client fails fast before allowing requests again.
    pub cooldown_seconds: u64,
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }
}

/// Main library configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub recognition: RecognitionConfig,
    pub translation: TranslationConfig,
    pub log_level: Level,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self::load_from_env();
        config.validate()?;
        Ok(config)
    }

    fn load_from_env() -> Self {
        let languages = env::var("RECOGNITION_LANGUAGES")
            .ok()
            .map(|langs| {
                langs
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_RECOGNITION_LANGUAGES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|s| match s.to_lowercase().as_str() {
                "trace" => Some(Level::TRACE),
                "debug" => Some(Level::DEBUG),
                "info" => Some(Level::INFO),
                "warn" | "warning" => Some(Level::WARN),
                "error" => Some(Level::ERROR),
                _ => None,
            })
            .unwrap_or(Level::INFO);

        Self {
            recognition: RecognitionConfig { languages },
            translation: TranslationConfig {
                api_key: env::var("TRANSLATION_API_KEY")
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                model: env::var("TRANSLATION_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
                target_language: env::var("TARGET_LANGUAGE")
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "en".to_string()),
                timeout_seconds: env::var("TRANSLATION_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                connect_timeout_seconds: env::var("TRANSLATION_CONNECT_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                failure_threshold: env::var("TRANSLATION_FAILURE_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                cooldown_seconds: env::var("TRANSLATION_COOLDOWN_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            },
            log_level,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.recognition.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }

        for tag in &self.recognition.languages {
            if !is_valid_language_tag(tag) {
                return Err(ConfigError::InvalidLanguageTag(tag.clone()));
            }
        }

        if !is_valid_language_tag(&self.translation.target_language) {
            return Err(ConfigError::InvalidLanguageTag(
                self.translation.target_language.clone(),
            ));
        }

        if self.translation.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(self.translation.timeout_seconds));
        }

        if self.translation.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(
                self.translation.connect_timeout_seconds,
            ));
        }

        if self.translation.failure_threshold == 0 {
            return Err(ConfigError::InvalidFailureThreshold(
                self.translation.failure_threshold,
            ));
        }

        if self.translation.cooldown_seconds == 0 {
            return Err(ConfigError::InvalidCooldown(
                self.translation.cooldown_seconds,
            ));
        }

        Ok(())
    }

    pub fn recognition_languages(&self) -> &[String] {
        &self.recognition.languages
    }

    pub fn target_language(&self) -> &str {
        &self.translation.target_language
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }
}

/// A tag is a two-letter code ("en") or a BCP-47-style tag ("zh-Hant"):
/// 2-3 letter primary subtag, then '-'-separated alphanumeric subtags.
fn is_valid_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');

    let primary = match subtags.next() {
        Some(p) => p,
        None => return false,
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    subtags.all(|s| {
        (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

// Note: No Default implementation because Config::new() can fail
// Users should explicitly call Config::new()? and handle errors
