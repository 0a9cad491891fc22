use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global tracing subscriber: `RUST_LOG` filter, compact console output.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_telemetry() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    let result = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelpipe=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .try_init();

    if result.is_ok() {
        tracing::info!("Tracing initialized");
    }
}
