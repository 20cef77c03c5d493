//! Structured logging setup.
//!
//! Tracing is opt-in: the subscriber is only installed when `RUST_LOG` is
//! set, so normal chat output stays clean. Diagnostics go to stderr and
//! never interleave with the conversation on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. Run with e.g.
/// `RUST_LOG=parlo=debug` to watch turns move through the pipeline.
pub fn init_tracing() {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize with a custom filter string. Safe to call more than once;
/// only the first call installs a subscriber.
pub fn init_tracing_with_filter(filter: &str) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
