use tracing_subscriber::FmtSubscriber;

/// Install a global tracing subscriber at INFO level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_logger() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
