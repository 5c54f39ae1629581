//! Tracing configuration for debugging type inference runs.
//!
//! Supports three output formats controlled by `TPROF_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Trace every widening and cycle break in the lattice
//! TPROF_LOG=tprof_lattice=trace TPROF_LOG_FORMAT=tree cargo test -p tprof-lattice
//!
//! # Plain text
//! RUST_LOG=debug cargo bench -p tprof-lattice
//! ```
//!
//! The subscriber is only initialised when `TPROF_LOG` (or `RUST_LOG`) is set.
//! The lattice crates themselves only emit events; installing a subscriber is
//! left to whoever embeds them.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read the format from the `TPROF_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("TPROF_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `TPROF_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TPROF_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TPROF_LOG` nor `RUST_LOG` is set. Calling it
/// again after a subscriber is installed is a no-op, so every test may call
/// it. All output goes to stderr.
pub fn init_tracing() {
    let has_tprof_log = std::env::var("TPROF_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_tprof_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    // try_init: a second initialisation (another test in the same binary) is ignored
    let _ = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => Registry::default()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
