//! Sparse chunked cliff terrain: vertex height storage with per-chunk
//! change tracking, tile shape classification and chunk mesh assembly
//! from authored fragments.

pub mod terrain;

pub use terrain::*;

/// Installs `env_logger` for hosts that have no logger of their own.
/// Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
