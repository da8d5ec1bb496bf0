use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable selecting indented, tree-shaped log output.
pub const LOG_TREE_VAR: &str = "HYP_LOG_TREE";

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=hyp_eval=debug` or `RUST_LOG=hyp_parse=trace`; set
/// `HYP_LOG_TREE=1` to nest events under their spans.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        // A host may already have installed a subscriber.
        let _ = if std::env::var_os(LOG_TREE_VAR).is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_level(true))
                .try_init()
        };
    });
}
