//! Logging shims that compile away without the `tracing` feature

macro_rules! log_at {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => { $crate::logging::log_at!(info, $($arg)*) };
}

macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::logging::log_at!(debug, $($arg)*) };
}

macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::logging::log_at!(warn, $($arg)*) };
}

pub(crate) use {log_at, log_debug, log_info, log_warn};
