// SPDX-License-Identifier: GPL-2.0

//! Unified logging support for the bridge crates
//!
//! With the `log` feature the macros forward to the `log` crate. Without it
//! they still type-check their arguments but emit nothing, so call sites need
//! no `#[cfg]` of their own.

/// Unified trace-level logging
#[cfg(feature = "log")]
#[macro_export]
macro_rules! kb_trace {
    ($($arg:tt)*) => { $crate::log::trace!($($arg)*) };
}

/// Unified debug-level logging
#[cfg(feature = "log")]
#[macro_export]
macro_rules! kb_debug {
    ($($arg:tt)*) => { $crate::log::debug!($($arg)*) };
}

/// Unified info-level logging
#[cfg(feature = "log")]
#[macro_export]
macro_rules! kb_info {
    ($($arg:tt)*) => { $crate::log::info!($($arg)*) };
}

/// Unified warn-level logging
#[cfg(feature = "log")]
#[macro_export]
macro_rules! kb_warn {
    ($($arg:tt)*) => { $crate::log::warn!($($arg)*) };
}

/// Unified error-level logging
#[cfg(feature = "log")]
#[macro_export]
macro_rules! kb_error {
    ($($arg:tt)*) => { $crate::log::error!($($arg)*) };
}

#[cfg(not(feature = "log"))]
#[macro_export]
macro_rules! kb_trace {
    ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }};
}

#[cfg(not(feature = "log"))]
#[macro_export]
macro_rules! kb_debug {
    ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }};
}

#[cfg(not(feature = "log"))]
#[macro_export]
macro_rules! kb_info {
    ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }};
}

#[cfg(not(feature = "log"))]
#[macro_export]
macro_rules! kb_warn {
    ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }};
}

#[cfg(not(feature = "log"))]
#[macro_export]
macro_rules! kb_error {
    ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }};
}
