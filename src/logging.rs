use tracing_subscriber::{
    fmt,
    fmt::MakeWriter,
    EnvFilter,
};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs the global fmt subscriber. `RUST_LOG` wins over `level`.
/// Calling it again is harmless.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Runs `f` under a stderr subscriber at the default level. Used for the
/// work that has to happen before the configured level is known, such as
/// reading the settings file.
pub fn with_startup_logging<T>(f: impl FnOnce() -> T) -> T {
    with_startup_logging_to(std::io::stderr, f)
}

fn with_startup_logging_to<W, T>(writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish();

    tracing::subscriber::with_default(subscriber, f)
}

#[cfg(test)]
pub(crate) fn init_test_logging() {
    use std::sync::Once;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}
