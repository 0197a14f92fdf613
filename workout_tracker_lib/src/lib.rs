pub mod config;
pub mod error;
pub mod form;
pub mod geolocation;
pub mod map;
pub mod storage;
pub mod tracker;
pub mod validation;
pub mod workout;

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
