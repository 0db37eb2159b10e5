// SPDX-License-Identifier: GPL-2.0

//! Linux backend.
//!
//! [`Linux`] implements [`Runtime`] by calling the kernel's own primitives.
//! Where the kernel only has an inline or a macro, the build links an
//! out-of-line definition under the primitive's name. Everything else binds
//! to the exported function directly.

use kbridge_api::bindings::{
    c_char, c_int, c_uint, c_ulong, c_void, gfp_t, iov_iter, lock_class_key, net_device, page,
    pcpu_lstats, rtnl_link_ops, sk_buff, size_t, spinlock_t, task_struct, wait_queue_entry,
};

use crate::runtime::Runtime;

mod ffi {
    use super::*;

    unsafe extern "C" {
        #[link_name = "BUG"]
        pub fn bug();

        pub fn copy_from_user(to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;
        pub fn copy_to_user(to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;
        pub fn clear_user(to: *mut c_void, n: c_ulong) -> c_ulong;

        #[link_name = "__spin_lock_init"]
        pub fn debug_spin_lock_init(
            lock: *mut spinlock_t,
            name: *const c_char,
            key: *mut lock_class_key,
        );
        pub fn spin_lock_init(lock: *mut spinlock_t);
        pub fn spin_lock(lock: *mut spinlock_t);
        pub fn spin_unlock(lock: *mut spinlock_t);

        pub fn init_wait(wq_entry: *mut wait_queue_entry);

        pub fn get_current() -> *mut task_struct;
        pub fn task_pid_nr(tsk: *mut task_struct) -> c_int;
        pub fn signal_pending(p: *mut task_struct) -> c_int;
        pub fn cond_resched() -> c_int;

        pub fn alloc_pages(gfp_mask: gfp_t, order: c_uint) -> *mut page;
        pub fn __free_pages(page: *mut page, order: c_uint);
        pub fn kmap(page: *mut page) -> *mut c_void;
        pub fn kunmap(page: *mut page);

        pub fn copy_from_iter(addr: *mut c_void, bytes: size_t, i: *mut iov_iter) -> size_t;
        pub fn copy_to_iter(addr: *const c_void, bytes: size_t, i: *mut iov_iter) -> size_t;

        pub fn netdev_priv(dev: *mut net_device) -> *mut c_void;
        pub fn eth_hw_addr_random(dev: *mut net_device);
        pub fn netdev_alloc_pcpu_lstats() -> *mut pcpu_lstats;
        pub fn netdev_lstats(dev: *mut net_device) -> *mut pcpu_lstats;
        pub fn netdev_set_lstats(dev: *mut net_device, lstats: *mut pcpu_lstats);
        pub fn dev_lstats_add(dev: *mut net_device, len: c_uint);
        pub fn dev_lstats_read(dev: *mut net_device, packets: *mut u64, bytes: *mut u64);
        pub fn free_percpu(ptr: *mut c_void);

        pub fn rtnl_lock();
        pub fn rtnl_unlock();
        pub fn rtnl_link_register(ops: *mut rtnl_link_ops) -> c_int;
        pub fn rtnl_link_unregister(ops: *mut rtnl_link_ops);

        pub fn skb_len(skb: *mut sk_buff) -> c_uint;
        pub fn skb_tx_timestamp(skb: *mut sk_buff);
        pub fn consume_skb(skb: *mut sk_buff);
    }
}

/// The running kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linux;

impl Runtime for Linux {
    unsafe fn bug(&self) {
        unsafe { ffi::bug() }
    }

    unsafe fn copy_from_user(&self, to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong {
        unsafe { ffi::copy_from_user(to, from, n) }
    }

    unsafe fn copy_to_user(&self, to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong {
        unsafe { ffi::copy_to_user(to, from, n) }
    }

    unsafe fn clear_user(&self, to: *mut c_void, n: c_ulong) -> c_ulong {
        unsafe { ffi::clear_user(to, n) }
    }

    unsafe fn debug_spin_lock_init(
        &self,
        lock: *mut spinlock_t,
        name: *const c_char,
        key: *mut lock_class_key,
    ) {
        unsafe { ffi::debug_spin_lock_init(lock, name, key) }
    }

    unsafe fn spin_lock_init(&self, lock: *mut spinlock_t) {
        unsafe { ffi::spin_lock_init(lock) }
    }

    unsafe fn spin_lock(&self, lock: *mut spinlock_t) {
        unsafe { ffi::spin_lock(lock) }
    }

    unsafe fn spin_unlock(&self, lock: *mut spinlock_t) {
        unsafe { ffi::spin_unlock(lock) }
    }

    unsafe fn init_wait(&self, entry: *mut wait_queue_entry) {
        unsafe { ffi::init_wait(entry) }
    }

    unsafe fn current_pid(&self) -> c_int {
        unsafe { ffi::task_pid_nr(ffi::get_current()) }
    }

    unsafe fn signal_pending(&self) -> c_int {
        unsafe { ffi::signal_pending(ffi::get_current()) }
    }

    unsafe fn alloc_pages(&self, gfp_mask: gfp_t, order: c_uint) -> *mut page {
        unsafe { ffi::alloc_pages(gfp_mask, order) }
    }

    unsafe fn kmap(&self, page: *mut page) -> *mut c_void {
        unsafe { ffi::kmap(page) }
    }

    unsafe fn kunmap(&self, page: *mut page) {
        unsafe { ffi::kunmap(page) }
    }

    unsafe fn cond_resched(&self) -> c_int {
        unsafe { ffi::cond_resched() }
    }

    unsafe fn copy_from_iter(&self, addr: *mut c_void, bytes: size_t, i: *mut iov_iter) -> size_t {
        unsafe { ffi::copy_from_iter(addr, bytes, i) }
    }

    unsafe fn copy_to_iter(&self, addr: *const c_void, bytes: size_t, i: *mut iov_iter) -> size_t {
        unsafe { ffi::copy_to_iter(addr, bytes, i) }
    }

    unsafe fn netdev_priv(&self, dev: *mut net_device) -> *mut c_void {
        unsafe { ffi::netdev_priv(dev) }
    }

    unsafe fn eth_hw_addr_random(&self, dev: *mut net_device) {
        unsafe { ffi::eth_hw_addr_random(dev) }
    }

    unsafe fn netdev_alloc_pcpu_stats(&self) -> *mut pcpu_lstats {
        unsafe { ffi::netdev_alloc_pcpu_lstats() }
    }

    unsafe fn netdev_set_lstats(&self, dev: *mut net_device, stats: *mut pcpu_lstats) {
        unsafe { ffi::netdev_set_lstats(dev, stats) }
    }

    unsafe fn dev_lstats_add(&self, dev: *mut net_device, len: c_uint) {
        unsafe { ffi::dev_lstats_add(dev, len) }
    }

    unsafe fn netdev_lstats(&self, dev: *mut net_device) -> *mut pcpu_lstats {
        unsafe { ffi::netdev_lstats(dev) }
    }

    unsafe fn dev_lstats_read(&self, dev: *mut net_device, packets: *mut u64, bytes: *mut u64) {
        unsafe { ffi::dev_lstats_read(dev, packets, bytes) }
    }

    unsafe fn free_pages(&self, page: *mut page, order: c_uint) {
        unsafe { ffi::__free_pages(page, order) }
    }

    unsafe fn free_percpu(&self, ptr: *mut c_void) {
        unsafe { ffi::free_percpu(ptr) }
    }

    unsafe fn rtnl_lock(&self) {
        unsafe { ffi::rtnl_lock() }
    }

    unsafe fn rtnl_unlock(&self) {
        unsafe { ffi::rtnl_unlock() }
    }

    unsafe fn rtnl_link_register(&self, ops: *mut rtnl_link_ops) -> c_int {
        unsafe { ffi::rtnl_link_register(ops) }
    }

    unsafe fn rtnl_link_unregister(&self, ops: *mut rtnl_link_ops) {
        unsafe { ffi::rtnl_link_unregister(ops) }
    }

    unsafe fn skb_len(&self, skb: *mut sk_buff) -> c_uint {
        unsafe { ffi::skb_len(skb) }
    }

    unsafe fn skb_tx_timestamp(&self, skb: *mut sk_buff) {
        unsafe { ffi::skb_tx_timestamp(skb) }
    }

    unsafe fn consume_skb(&self, skb: *mut sk_buff) {
        unsafe { ffi::consume_skb(skb) }
    }
}
