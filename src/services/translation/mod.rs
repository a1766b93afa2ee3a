// Translation service: trait boundary, production client, process singleton

pub mod failure_gate;
pub mod http_client;

pub use failure_gate::FailureGate;
pub use http_client::HttpTranslator;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

use crate::core::errors::{TranslationError, TranslationResult};
use crate::core::types::TranslatedText;

/// Translation boundary: UTF-8 text in, UTF-8 text out, one completion per
/// call. The target language is process-wide configuration, not a per-call
/// parameter. Implementations keep no state between calls.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> TranslationResult<TranslatedText>;
}

/// Process-wide shared translator instance.
static SHARED_TRANSLATOR: OnceCell<Arc<dyn Translator>> = OnceCell::new();

/// Install the process-wide translator. Production wiring calls this once at
/// startup with the network-backed instance; tests inject a stub directly
/// into the controller instead. Returns false if one was already installed
/// (the existing instance stays).
pub fn install_shared(translator: Arc<dyn Translator>) -> bool {
    let installed = SHARED_TRANSLATOR.set(translator).is_ok();
    if installed {
        info!("shared translator installed");
    }
    installed
}

/// Address the shared translator.
pub fn shared() -> TranslationResult<Arc<dyn Translator>> {
    SHARED_TRANSLATOR
        .get()
        .cloned()
        .ok_or(TranslationError::NotConfigured)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str) -> TranslationResult<TranslatedText> {
            Ok(text.to_string())
        }
    }

    #[test]
    fn test_shared_translator_installs_once() {
        // Shared state across the test binary: only the first install wins,
        // and `shared` hands back a usable instance afterwards.
        let first = install_shared(Arc::new(EchoTranslator));
        let second = install_shared(Arc::new(EchoTranslator));
        assert!(first);
        assert!(!second);
        assert!(shared().is_ok());
    }
}
