pub mod acquisition;
pub mod permission;
pub mod recognition;
pub mod translation;

pub use acquisition::{ImagePicker, ImageSource, PickedImage};
pub use permission::{CameraAuthorizer, PermissionGate};
pub use recognition::{DetectedLine, RecognitionEngine, TextCandidate, TextDetector};
pub use translation::{HttpTranslator, Translator};
