pub mod types;

pub use types::*;

use log::error;
use prometheus::{Encoder, TextEncoder};

/// Renders every registered metric in Prometheus text format. Serving the
/// output (HTTP or otherwise) is the host's concern.
pub fn render() -> String {
    register_metrics();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = vec![];
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", err);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
