//! Metrics/tracing hooks.
//!
//! The library only emits events; installing a subscriber is up to the binary.

use tracing::Level;

/// Emit one trace-level span carrying `key_values` as events.
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::span!(Level::TRACE, "colscan", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, %v, "metric");
    }
}
