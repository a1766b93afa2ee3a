pub mod image_ops;
pub mod metrics;

pub use image_ops::decode_rgba_async;
pub use metrics::{Metrics, MetricsSnapshot};
