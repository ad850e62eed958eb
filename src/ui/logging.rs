use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map `-v`/`-q` onto a tracing level for this crate.
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }

    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over the flags.
///
/// Returns false if a global subscriber was already installed.
pub fn init_logging(verbose: u8, quiet: bool) -> bool {
    let level = log_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("halltab={}", level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok();

    if installed {
        debug!("Logging initialized at level: {}", level);
    }
    installed
}
