//! Tracing/logging setup shared by binaries, demos and benches.

/// Initialize process-wide tracing with settings read from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(subscriber::LogFormat::from_env());
}

/// Subscriber construction (filters, output format).
pub mod subscriber;
