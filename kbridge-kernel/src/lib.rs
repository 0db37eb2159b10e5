// SPDX-License-Identifier: GPL-2.0

//! kbridge Kernel - Safe abstractions over the helper bridge
//!
//! Wraps the raw forwarding functions of `kbridge-helpers` in types that
//! pair acquire with release, check bounds before copying, and turn status
//! codes into [`Result`]s.
//!
//! # Architecture
//!
//! - **User pointers**: bounded, cursor-based access to user memory
//! - **Sync**: spinlock over a runtime-owned lock
//! - **Wait / Task**: wait entries and the current task
//! - **Pages**: owned page allocations with scoped mappings
//! - **IovIter**: copies to and from an iterator
//! - **Net**: ethernet address checks, netlink attributes, devices, RTNL
//!
//! Every operation takes the runtime as `&R` where `R: Runtime + ?Sized`,
//! so the same code runs against the kernel or a test double.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kbridge_kernel::net::rtnl::RtnlLock;
//! use kbridge_kernel::task::Task;
//!
//! let _rtnl = RtnlLock::lock(rt);
//! Task::check_signal(rt)?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub use kbridge_api::{Error, GfpFlags, Result};
pub use kbridge_helpers::Runtime;

pub mod iov_iter;
pub mod net;
pub mod pages;
pub mod sync;
pub mod task;
pub mod user_ptr;
pub mod wait;
