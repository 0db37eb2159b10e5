// SPDX-License-Identifier: GPL-2.0

//! kbridge API - Core types for the kernel helper bridge
//!
//! This crate provides the types shared by every layer of the bridge between
//! Rust code and the kernel runtime it runs inside. Nothing here calls into
//! the runtime; it only describes what crosses the boundary.
//!
//! # Architecture
//!
//! - **Bindings**: opaque handle types and C scalar aliases
//! - **Gfp**: allocation flag set passed to the page allocator
//! - **Error**: errno-backed error type and `Result` alias
//! - **Logging**: logging macros that vanish without the `log` feature
//!
//! # Usage
//!
//! ```rust
//! use kbridge_api::error::{Error, Result};
//! use kbridge_api::bindings::ENOMEM;
//!
//! fn check(ret: i32) -> Result<()> {
//!     Error::from_kernel_result(ret)
//! }
//!
//! assert_eq!(check(-ENOMEM), Err(Error::OutOfMemory));
//! assert_eq!(check(0), Ok(()));
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "log")]
#[doc(hidden)]
pub use log;

pub mod bindings;
pub mod error;
pub mod gfp;
pub mod logging;

// Re-export commonly used types
pub use crate::error::{Error, Result};
pub use crate::gfp::GfpFlags;
