//! Logging macros that forward to the `log` crate when the `logging` feature is enabled.
//!
//! Without the feature, the arguments are still evaluated by reference so that no
//! unused-variable warnings show up at the call sites.

macro_rules! log_at {
    ($level:ident, $fmt:literal $(, $($arg:expr),* $(,)?)?) => {
        #[cfg(feature = "logging")]
        ::log::$level!($fmt $(, $($arg),*)?);
        #[cfg(not(feature = "logging"))]
        { $($(let _ = &$arg;)*)? }
    };
}

macro_rules! ltrace {
    ($($tt:tt)*) => {
        log_at!(trace, $($tt)*)
    };
}

macro_rules! ldebug {
    ($($tt:tt)*) => {
        log_at!(debug, $($tt)*)
    };
}

macro_rules! lwarn {
    ($($tt:tt)*) => {
        log_at!(warn, $($tt)*)
    };
}
