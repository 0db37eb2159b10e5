// SPDX-License-Identifier: GPL-2.0

//! kbridge Helpers
//!
//! Forwarding entry points that expose kernel runtime primitives (user memory
//! copies, spinlocks, wait queues, page mapping, scheduling cooperation,
//! iov_iter copies, network device statistics) as plain `extern "C"` symbols.
//! Many of these primitives are inline functions or macros on the runtime side
//! and have no linkable symbol of their own.
//!
//! # Architecture
//!
//! - **Runtime**: the [`Runtime`] trait, one method per wrapped primitive
//! - **Helpers**: generic forwarding functions over any [`Runtime`]
//! - **Symbols**: the exported symbol table as data
//! - **Export**: [`export_helpers!`] emits the `rust_helper_*` symbols
//! - **Linux** (`kernel` feature): the backend that links against the runtime
//!
//! Every helper returns exactly what the runtime returned. The only local
//! logic is in [`helpers::net_device_set_new_lstats`], which turns a failed
//! allocation into `-ENOMEM`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kbridge_helpers::{helpers, Runtime};
//!
//! fn user_read<R: Runtime>(rt: &R, dst: &mut [u8], src: *const core::ffi::c_void) -> u64 {
//!     unsafe { helpers::copy_from_user(rt, dst.as_mut_ptr().cast(), src, dst.len() as _) as u64 }
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std", feature = "mock")), no_std)]

pub use kbridge_api::bindings;
pub use kbridge_api::{Error, Result};

pub mod export;
pub mod helpers;
pub mod runtime;
pub mod symbols;

#[cfg(feature = "kernel")]
pub mod linux;

pub use runtime::Runtime;
#[cfg(any(test, feature = "mock"))]
pub use runtime::MockRuntime;
pub use symbols::{Export, HelperSymbol, HELPERS};

#[cfg(feature = "kernel")]
crate::export_helpers!(&crate::linux::Linux);
