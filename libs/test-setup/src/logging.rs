use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber};

/// Installs a global subscriber writing to the test output, filtered with
/// `RUST_LOG`. Safe to call from every test.
pub fn init_logger() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish()
        .with(ErrorLayer::default());

    // Only the first test to get here installs it.
    tracing::subscriber::set_global_default(subscriber).ok();
}
