use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber once; later calls are no-ops.
///
/// `RUST_LOG` wins over `level`; an unparsable `level` falls back to `info`.
pub fn init_tracing(level: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = fmt::layer().with_target(false);
        let subscriber = Registry::default().with(filter).with(fmt_layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
