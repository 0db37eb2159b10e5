// SPDX-License-Identifier: GPL-2.0

//! Types that cross the boundary to the kernel runtime.
//!
//! Runtime structures are declared as opaque, zero-sized `#[repr(C)]` types:
//! Rust code only ever holds pointers to them and never looks inside. The one
//! exception is [`nlattr`], whose header layout is part of the netlink ABI.

#![allow(non_camel_case_types)]

use core::marker::{PhantomData, PhantomPinned};

pub use core::ffi::{c_char, c_int, c_uint, c_ulong, c_void};

/// C `size_t`.
pub type size_t = usize;
/// C `uintptr_t`.
pub type uintptr_t = usize;
/// Allocation flags as the runtime sees them.
pub type gfp_t = c_uint;

macro_rules! opaque_types {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            pub struct $name {
                _data: [u8; 0],
                _marker: PhantomData<(*mut u8, PhantomPinned)>,
            }
        )*
    };
}

opaque_types! {
    /// `spinlock_t`
    spinlock_t;
    /// `struct lock_class_key`, used by lock debugging to group locks.
    lock_class_key;
    /// `struct wait_queue_entry`
    wait_queue_entry;
    /// `struct page`
    page;
    /// `struct iov_iter`, a cursor over a vectored I/O request.
    iov_iter;
    /// `struct net_device`
    net_device;
    /// `struct pcpu_lstats`, per-CPU packet and byte counters.
    pcpu_lstats;
    /// `struct task_struct`
    task_struct;
    /// `struct sk_buff`, one network packet.
    sk_buff;
    /// `struct rtnl_link_ops`, a link type registered with rtnetlink.
    rtnl_link_ops;
}

/// Netlink attribute header.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct nlattr {
    /// Length of header plus payload.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

static_assertions::assert_eq_size!(nlattr, [u8; 4]);

/// Link statistics reported to user space (`struct rtnl_link_stats64`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct rtnl_link_stats64 {
    pub rx_packets: u64,
    pub tx_packets: u64,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub rx_dropped: u64,
    pub tx_dropped: u64,
    pub multicast: u64,
    pub collisions: u64,
    pub rx_length_errors: u64,
    pub rx_over_errors: u64,
    pub rx_crc_errors: u64,
    pub rx_frame_errors: u64,
    pub rx_fifo_errors: u64,
    pub rx_missed_errors: u64,
    pub tx_aborted_errors: u64,
    pub tx_carrier_errors: u64,
    pub tx_fifo_errors: u64,
    pub tx_heartbeat_errors: u64,
    pub tx_window_errors: u64,
    pub rx_compressed: u64,
    pub tx_compressed: u64,
    pub rx_nohandler: u64,
}

static_assertions::assert_eq_size!(rtnl_link_stats64, [u64; 24]);

/// Page size of the runtime.
pub const PAGE_SIZE: usize = 4096;
/// log2 of [`PAGE_SIZE`].
pub const PAGE_SHIFT: usize = 12;

/// Octets in one ethernet address.
pub const ETH_ALEN: usize = 6;

/// Aligned size of [`nlattr`].
pub const NLA_HDRLEN: usize = 4;

/// `IFLA_ADDRESS` link attribute.
pub const IFLA_ADDRESS: u16 = 1;
/// Highest link attribute type the runtime defines.
pub const IFLA_MAX: u16 = 55;

/// Largest value the runtime uses as an errno.
pub const MAX_ERRNO: c_int = 4095;

pub const EINTR: c_int = 4;
pub const ENOMEM: c_int = 12;
pub const EFAULT: c_int = 14;
pub const EBUSY: c_int = 16;
pub const EINVAL: c_int = 22;
pub const EADDRNOTAVAIL: c_int = 99;

// The helpers take byte counts as `size_t` and `unsigned long` while callers
// hold `usize`. 32-bit ARM spells `size_t` and `uintptr_t` differently, so it
// is left out, as the C side does.
#[cfg(not(target_arch = "arm"))]
mod width {
    use super::{c_ulong, size_t, uintptr_t};

    static_assertions::assert_eq_size!(size_t, uintptr_t);
    static_assertions::assert_eq_size!(c_ulong, usize);
}
