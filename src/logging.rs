use std::sync::Once;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// default directive applied on top of `RUST_LOG`
pub const DEFAULT_DIRECTIVE: &str = "household_projection=info";

/// install a global fmt subscriber once; later calls are no-ops
///
/// the library never calls this itself, binaries and demos do.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // another subscriber may already be installed by the host application
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
