pub(crate) mod files;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

pub const DEFAULT_LOG_DIRECTIVE: &str = "budget_store=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_DIRECTIVE);
}

/// Initializes the global tracing subscriber, layering `directive` over `RUST_LOG`.
///
/// An unparsable directive falls back to [`DEFAULT_LOG_DIRECTIVE`]. Only the first call
/// installs a subscriber; later calls are ignored.
pub fn init_tracing_with(directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let directive = parse_directive(directive);
        let filter = EnvFilter::from_default_env().add_directive(directive);

        // A host application may already own the global subscriber.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

fn parse_directive(raw: &str) -> Directive {
    match raw.parse() {
        Ok(directive) => directive,
        Err(_) => DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| Directive::from(tracing::Level::INFO)),
    }
}
