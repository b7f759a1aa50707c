use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Ceiling for events from this crate. Dependencies (reqwest, hyper) never
/// pass the `trm` target filter, so their chatter stays out of the panel.
/// With `RUST_LOG` set the ceiling is lifted and the env filter decides.
fn app_level(verbose: bool, env_configured: bool) -> LevelFilter {
    match (verbose, env_configured) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::TRACE,
        (false, false) => LevelFilter::OFF,
    }
}

/// Logs go to stderr so they never interleave with the rendered panel.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().ok();
    let app_filter = Targets::new().with_target("trm", app_level(verbose, env_filter.is_some()));
    let env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
