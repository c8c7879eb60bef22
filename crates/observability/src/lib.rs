//! Tracing/logging setup shared by routeguard binaries.

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide logging in the given format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
