//! Logging shims that compile away without the `tracing` feature

macro_rules! log_at {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => { $crate::token_tab::logging::log_at!(info, $($arg)*) };
}

macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::token_tab::logging::log_at!(debug, $($arg)*) };
}

macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::token_tab::logging::log_at!(warn, $($arg)*) };
}

macro_rules! log_error {
    ($($arg:tt)*) => { $crate::token_tab::logging::log_at!(error, $($arg)*) };
}

pub(crate) use {log_at, log_debug, log_error, log_info, log_warn};
