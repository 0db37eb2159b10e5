// SPDX-License-Identifier: GPL-2.0

//! Routing netlink: the RTNL lock, link type registration and link
//! statistics.

use core::marker::PhantomData;

use kbridge_api::bindings::{rtnl_link_ops, rtnl_link_stats64};
use kbridge_api::{kb_warn, Error, Result};
use kbridge_helpers::Runtime;

use super::device::NetDevice;

/// Holds the RTNL lock until dropped.
///
/// Not `Send`: the task that locked it unlocks it.
#[must_use = "the rtnl unlocks immediately when the guard is unused"]
pub struct RtnlLock<'a, R: Runtime + ?Sized> {
    rt: &'a R,
    _not_send: PhantomData<*mut ()>,
}

impl<'a, R: Runtime + ?Sized> RtnlLock<'a, R> {
    /// Takes the lock, sleeping if needed.
    pub fn lock(rt: &'a R) -> Self {
        // SAFETY: takes no pointers; callers are in sleepable context.
        unsafe { rt.rtnl_lock() };
        Self {
            rt,
            _not_send: PhantomData,
        }
    }
}

impl<R: Runtime + ?Sized> Drop for RtnlLock<'_, R> {
    fn drop(&mut self) {
        // SAFETY: taken in `lock`.
        unsafe { self.rt.rtnl_unlock() };
    }
}

/// A link type the runtime can instantiate (`struct rtnl_link_ops`).
pub struct RtnlLinkOps {
    ops: *mut rtnl_link_ops,
}

// SAFETY: the ops table is only handed to the runtime, which serializes
// registration under the RTNL lock.
unsafe impl Sync for RtnlLinkOps {}

impl RtnlLinkOps {
    /// # Safety
    ///
    /// `ops` must point to a filled-in `rtnl_link_ops` that stays valid and
    /// unmoved until after [`RtnlLinkOps::unregister`].
    pub unsafe fn from_raw(ops: *mut rtnl_link_ops) -> Self {
        Self { ops }
    }

    pub fn as_raw(&self) -> *mut rtnl_link_ops {
        self.ops
    }

    /// Makes the link type available to `ip link add`.
    pub fn register<R: Runtime + ?Sized>(&self, rt: &R) -> Result<()> {
        // SAFETY: `ops` is valid by the constructor's contract.
        let ret = unsafe { rt.rtnl_link_register(self.ops) };
        Error::from_kernel_result(ret).inspect_err(|err| {
            kb_warn!("rtnl link registration failed: {}", err);
        })
    }

    /// Removes the link type and every device created from it.
    pub fn unregister<R: Runtime + ?Sized>(&self, rt: &R) {
        // SAFETY: `ops` is valid by the constructor's contract.
        unsafe { rt.rtnl_link_unregister(self.ops) }
    }
}

/// The statistics block a `ndo_get_stats64` hook fills in.
pub struct RtnlLinkStats64<'a> {
    stats: &'a mut rtnl_link_stats64,
}

impl<'a> RtnlLinkStats64<'a> {
    /// # Safety
    ///
    /// `stats` must be valid for writes and unaliased for `'a`.
    pub unsafe fn from_raw(stats: *mut rtnl_link_stats64) -> Self {
        // SAFETY: guaranteed by the caller.
        Self {
            stats: unsafe { &mut *stats },
        }
    }

    /// Stores the device's per-CPU transmit totals into the block.
    ///
    /// # Safety
    ///
    /// `dev` must have per-CPU statistics attached by a successful
    /// [`NetDevice::set_new_pcpu_lstats`], not yet freed.
    pub unsafe fn dev_read<R: Runtime + ?Sized>(&mut self, rt: &R, dev: &NetDevice) {
        let stats = &mut *self.stats;
        unsafe { rt.dev_lstats_read(dev.as_raw(), &mut stats.tx_packets, &mut stats.tx_bytes) }
    }

    pub fn tx_packets(&self) -> u64 {
        self.stats.tx_packets
    }

    pub fn tx_bytes(&self) -> u64 {
        self.stats.tx_bytes
    }

    pub fn get(&self) -> &rtnl_link_stats64 {
        self.stats
    }
}
