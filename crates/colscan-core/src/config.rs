//! Query configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which linear search path the executor runs for unsorted columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearScan {
    /// Word-at-a-time block scan.
    #[default]
    Aligned,
    /// Row-at-a-time reference scan.
    Unaligned,
}

impl LinearScan {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aligned" => Some(LinearScan::Aligned),
            "unaligned" => Some(LinearScan::Unaligned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Linear path used for unsorted columns and fallbacks.
    pub linear_scan: LinearScan,

    /// Sorted ranges smaller than this are scanned linearly instead of
    /// binary searched.
    pub binary_search_min_rows: u32,

    /// Whether columns carrying an external sort index use it for
    /// index-based binary search.
    pub use_sorted_index: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            linear_scan: LinearScan::Aligned,
            binary_search_min_rows: 64,
            use_sorted_index: true,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `COLSCAN_LINEAR_SCAN`: `aligned` or `unaligned`
    /// - `COLSCAN_BINARY_SEARCH_MIN_ROWS`: minimum sorted range size for binary search
    /// - `COLSCAN_USE_SORTED_INDEX`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("COLSCAN_LINEAR_SCAN") {
            if let Some(v) = LinearScan::parse(&s) {
                cfg.linear_scan = v;
            }
        }

        if let Ok(s) = std::env::var("COLSCAN_BINARY_SEARCH_MIN_ROWS") {
            if let Ok(v) = s.parse::<u32>() {
                cfg.binary_search_min_rows = v;
            }
        }

        if let Ok(s) = std::env::var("COLSCAN_USE_SORTED_INDEX") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.use_sorted_index = v;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?cfg, "query config loaded from env");

        cfg
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
