// Domain types for the capture-to-translation pipeline

use std::sync::Arc;

/// Tri-state authorization result exposed by the permission gate.
///
/// `Unknown` is the initial value before any check; once a check resolves the
/// state moves to `Granted` or `Denied` and never reverts on its own. A later
/// `check_and_request` call may move it again because the OS state is always
/// re-queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationState {
    Unknown,
    Granted,
    Denied,
}

/// Camera authorization as reported by the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAuthorization {
    Authorized,
    NotDetermined,
    Denied,
    Restricted,
}

/// The two ways to obtain a raw image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Live capture; requires `AuthorizationState::Granted`.
    Camera,
    /// Existing photo library; no authorization needed.
    Library,
}

/// An owned in-memory raster image, normalized to RGBA8.
///
/// At most one lives in the pipeline at a time; it sits behind an `Arc` in
/// `PipelineState` so snapshots and background recognition share it without
/// copying the pixel buffer.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes when well-formed.
    pub pixels: Vec<u8>,
}

impl CapturedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Expected buffer length for the stated dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// A buffer is readable when it is non-empty and matches its dimensions.
    pub fn is_readable(&self) -> bool {
        !self.pixels.is_empty() && self.pixels.len() == self.expected_len()
    }
}

/// Ordered text lines produced by one recognition pass.
///
/// Immutable once produced. Lines keep the order the detector reported them
/// in; an empty value is a valid result (the image contained no text) and is
/// distinct from recognition never having run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedText {
    lines: Vec<String>,
}

impl RecognizedText {
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The merged form handed to translation: lines joined by newlines.
    pub fn merged(&self) -> String {
        self.lines.join("\n")
    }
}

/// Translated output is a single UTF-8 string.
pub type TranslatedText = String;

/// Outcome of an `acquire` call. Cancellation is a normal outcome, not an
/// error: the user backed out and prior state is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    Acquired,
    Cancelled,
}

/// Outcome of a `recognize` call that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeOutcome {
    Recognized(RecognizedText),
    /// The image changed while recognition was outstanding; the late result
    /// was discarded and state is unchanged.
    Superseded,
}

/// Outcome of a `translate` call that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    Translated(TranslatedText),
    /// The flow was restarted while the call was outstanding; the late
    /// result was discarded and state is unchanged.
    Superseded,
}

/// The full pipeline state owned by the controller.
///
/// Fields are private so every mutation goes through the setters below; the
/// cascading-invalidation rule (a new image clears recognized and translated
/// text) is enforced here, not by callers remembering to do it.
#[derive(Debug, Clone)]
pub struct PipelineState {
    authorization: AuthorizationState,
    image: Option<Arc<CapturedImage>>,
    recognized: Option<RecognizedText>,
    translated: Option<TranslatedText>,
    translation_in_flight: bool,
    acquisition_in_flight: bool,
    reveal_translation: bool,
    generation: u64,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            authorization: AuthorizationState::Unknown,
            image: None,
            recognized: None,
            translated: None,
            translation_in_flight: false,
            acquisition_in_flight: false,
            reveal_translation: false,
            generation: 0,
        }
    }

    pub fn authorization(&self) -> AuthorizationState {
        self.authorization
    }

    pub fn image(&self) -> Option<&Arc<CapturedImage>> {
        self.image.as_ref()
    }

    pub fn recognized(&self) -> Option<&RecognizedText> {
        self.recognized.as_ref()
    }

    pub fn translated(&self) -> Option<&TranslatedText> {
        self.translated.as_ref()
    }

    pub fn translation_in_flight(&self) -> bool {
        self.translation_in_flight
    }

    pub fn acquisition_in_flight(&self) -> bool {
        self.acquisition_in_flight
    }

    /// True when the current translation is fresh and should be displayed,
    /// as opposed to a stale result held while a retranslation runs.
    pub fn reveal_translation(&self) -> bool {
        self.reveal_translation
    }

    /// Version tag for the current image. Completions captured under an
    /// older generation must be discarded, never committed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_authorization(&mut self, auth: AuthorizationState) {
        self.authorization = auth;
    }

    /// Install a newly acquired image. Replaces any previous image and
    /// clears recognized text, translated text, and the reveal flag in the
    /// same mutation; bumps the generation so outstanding completions for
    /// the old image are discarded.
    pub fn install_image(&mut self, image: CapturedImage) {
        self.image = Some(Arc::new(image));
        self.recognized = None;
        self.translated = None;
        self.reveal_translation = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Commit a recognition result. Requires an image to be present; a new
    /// recognition invalidates any existing translation.
    pub fn set_recognized(&mut self, text: RecognizedText) {
        debug_assert!(
            self.image.is_some(),
            "recognized text committed without an image"
        );
        self.recognized = Some(text);
        self.translated = None;
        self.reveal_translation = false;
    }

    /// Commit a translation result and mark it fresh for display.
    pub fn set_translated(&mut self, text: TranslatedText) {
        debug_assert!(
            self.recognized.as_ref().is_some_and(|r| !r.is_empty()),
            "translation committed without non-empty recognized text"
        );
        self.translated = Some(text);
        self.reveal_translation = true;
    }

    /// Hide the currently displayed translation while a new one is in
    /// flight, without discarding it.
    pub fn hide_translation(&mut self) {
        self.reveal_translation = false;
    }

    pub fn set_translation_in_flight(&mut self, in_flight: bool) {
        self.translation_in_flight = in_flight;
    }

    pub fn set_acquisition_in_flight(&mut self, in_flight: bool) {
        self.acquisition_in_flight = in_flight;
    }

    /// Restart the flow: drop the image and everything derived from it.
    /// Authorization is kept (it reflects OS state, not flow state). The
    /// generation bump invalidates any completion still outstanding.
    pub fn reset(&mut self) {
        self.image = None;
        self.recognized = None;
        self.translated = None;
        self.reveal_translation = false;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(w: u32, h: u32) -> CapturedImage {
        CapturedImage::new(w, h, vec![0u8; (w * h * 4) as usize])
    }

    #[test]
    fn test_install_image_cascades_invalidation() {
        let mut state = PipelineState::new();
        state.install_image(image(2, 2));
        state.set_recognized(RecognizedText::from_lines(vec!["HOLA".into()]));
        state.set_translated("HELLO".to_string());
        assert!(state.reveal_translation());

        let gen_before = state.generation();
        state.install_image(image(4, 4));

        assert!(state.image().is_some());
        assert!(state.recognized().is_none());
        assert!(state.translated().is_none());
        assert!(!state.reveal_translation());
        assert_eq!(state.generation(), gen_before + 1);
    }

    #[test]
    fn test_new_recognition_invalidates_translation() {
        let mut state = PipelineState::new();
        state.install_image(image(2, 2));
        state.set_recognized(RecognizedText::from_lines(vec!["EIN".into()]));
        state.set_translated("ONE".to_string());

        state.set_recognized(RecognizedText::from_lines(vec!["ZWEI".into()]));
        assert!(state.translated().is_none());
        assert!(!state.reveal_translation());
    }

    #[test]
    fn test_reset_clears_flow_but_keeps_authorization() {
        let mut state = PipelineState::new();
        state.set_authorization(AuthorizationState::Granted);
        state.install_image(image(2, 2));
        let gen = state.generation();

        state.reset();

        assert_eq!(state.authorization(), AuthorizationState::Granted);
        assert!(state.image().is_none());
        assert_eq!(state.generation(), gen + 1);
    }

    #[test]
    fn test_empty_recognized_text_is_distinct_from_unset() {
        let mut state = PipelineState::new();
        state.install_image(image(1, 1));
        assert!(state.recognized().is_none());

        state.set_recognized(RecognizedText::empty());
        assert!(state.recognized().is_some());
        assert!(state.recognized().unwrap().is_empty());
    }

    #[test]
    fn test_merged_joins_lines_in_order() {
        let text = RecognizedText::from_lines(vec!["HELLO".into(), "WORLD".into()]);
        assert_eq!(text.merged(), "HELLO\nWORLD");
    }

    #[test]
    fn test_captured_image_readability() {
        assert!(image(3, 2).is_readable());
        assert!(!CapturedImage::new(3, 2, Vec::new()).is_readable());
        assert!(!CapturedImage::new(3, 2, vec![0u8; 5]).is_readable());
    }
}
