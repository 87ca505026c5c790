//! Log output for the `vbs` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Does nothing unless `RUST_LOG` is set (e.g. `RUST_LOG=vbs_eval=debug`).
/// With `VBS_LOG_TREE` also set, events are printed as an indented call
/// tree instead of flat lines. Output goes to stderr; stdout carries the
/// rendered page. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("VBS_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
