//! Tracing configuration for debugging strategy decisions.
//!
//! Supports three output formats controlled by `TMPL_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, which follows
//!   nested pool fills well
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! TMPL_LOG=debug TMPL_LOG_FORMAT=tree my-backend build
//! TMPL_LOG="tmpl_backend::constant_pool=trace" my-backend build
//! ```
//!
//! The subscriber is only initialised when `TMPL_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "TMPL_LOG";
/// Environment variable selecting the [`LogFormat`].
pub const LOG_FORMAT_ENV: &str = "TMPL_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name. Unrecognized names fall back to [`LogFormat::Text`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|name| Self::parse(&name))
            .unwrap_or_default()
    }
}

/// `TMPL_LOG` wins over `RUST_LOG`. Both use `RUST_LOG` syntax.
fn build_filter(directives: Option<String>) -> EnvFilter {
    match directives {
        Some(val) => EnvFilter::builder().parse_lossy(val),
        None => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `TMPL_LOG` nor `RUST_LOG` is set, or when a
/// global subscriber is already installed. Output goes to stderr.
pub fn init_tracing() {
    let tmpl_log = std::env::var(LOG_ENV).ok();
    if tmpl_log.is_none() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter(tmpl_log);
    let result = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if let Err(err) = result {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
