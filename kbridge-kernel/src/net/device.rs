// SPDX-License-Identifier: GPL-2.0

//! Network devices.
//!
//! [`NetDevice`] borrows a runtime-owned `net_device`. Drivers using the
//! software statistics path call [`NetDevice::set_new_pcpu_lstats`] from
//! their init hook, [`NetDevice::lstats_add`] per transmitted packet,
//! [`RtnlLinkStats64::dev_read`](super::RtnlLinkStats64::dev_read) from
//! `ndo_get_stats64`, and [`NetDevice::free_lstats`] from their uninit hook.

use kbridge_api::bindings::{c_uint, net_device};
use kbridge_api::{kb_warn, Error, Result};
use kbridge_helpers::{helpers, Runtime};

/// A runtime-owned network device.
pub struct NetDevice {
    dev: *mut net_device,
}

impl NetDevice {
    /// # Safety
    ///
    /// `dev` must point to a registered or being-initialized `net_device`
    /// that outlives the returned value.
    pub unsafe fn from_raw(dev: *mut net_device) -> Self {
        Self { dev }
    }

    pub fn as_raw(&self) -> *mut net_device {
        self.dev
    }

    /// The driver-private area allocated with the device.
    ///
    /// Dereferencing the result is sound only if `T` matches what the
    /// driver asked the runtime to reserve.
    pub fn priv_data<T, R: Runtime + ?Sized>(&self, rt: &R) -> *mut T {
        // SAFETY: `dev` is live by the constructor's contract.
        unsafe { helpers::netdev_priv(rt, self.dev) }.cast()
    }

    /// Assigns a random locally administered hardware address.
    pub fn hw_addr_random<R: Runtime + ?Sized>(&self, rt: &R) {
        // SAFETY: `dev` is live by the constructor's contract.
        unsafe { helpers::eth_hw_addr_random(rt, self.dev) }
    }

    /// Allocates the per-CPU statistics block and attaches it to the device.
    pub fn set_new_pcpu_lstats<R: Runtime + ?Sized>(&self, rt: &R) -> Result<()> {
        // SAFETY: `dev` is live by the constructor's contract.
        let ret = unsafe { helpers::net_device_set_new_lstats(rt, self.dev) };
        Error::from_kernel_result(ret).inspect_err(|err| {
            kb_warn!("per-cpu lstats allocation failed: {}", err);
        })
    }

    /// Counts one transmitted packet of `len` bytes on this CPU.
    ///
    /// # Safety
    ///
    /// Statistics must be attached by a successful
    /// [`NetDevice::set_new_pcpu_lstats`] and not yet freed.
    pub unsafe fn lstats_add<R: Runtime + ?Sized>(&self, rt: &R, len: c_uint) {
        unsafe { helpers::dev_lstats_add(rt, self.dev, len) }
    }

    /// Frees the per-CPU statistics block.
    ///
    /// # Safety
    ///
    /// No CPU may be updating the statistics, and they must not be used
    /// again until a new block is attached.
    pub unsafe fn free_lstats<R: Runtime + ?Sized>(&self, rt: &R) {
        unsafe {
            let stats = rt.netdev_lstats(self.dev);
            rt.free_percpu(stats.cast());
        }
    }
}
