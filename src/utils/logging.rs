//! Conditional logging macros gated on a module-level `ENABLE_LOGS` const.
//!
//! Modules that want the chatty per-tick logging define
//! `const ENABLE_LOGS: bool = true;` and use `log_info!` and friends; the
//! quiet ones set it to false without touching call sites.

/// Initialize the `env_logger` backend. Honors `RUST_LOG`, defaults to info.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
