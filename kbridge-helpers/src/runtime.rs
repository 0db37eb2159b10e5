// SPDX-License-Identifier: GPL-2.0

//! The seam between Rust code and the kernel runtime.
//!
//! [`Runtime`] lists the primitives the helpers wrap, plus the few direct
//! bindings the safe layer needs to give back what the helpers hand out.
//! Implementations forward to the real runtime; nothing here owns state.

use kbridge_api::bindings::{
    c_char, c_int, c_uint, c_ulong, c_void, gfp_t, iov_iter, lock_class_key, net_device, page,
    pcpu_lstats, rtnl_link_ops, sk_buff, size_t, spinlock_t, wait_queue_entry,
};

/// Primitives provided by the kernel runtime.
///
/// # Safety
///
/// Every method hands its pointers to the runtime unchanged. Callers must
/// uphold whatever the runtime primitive of the same name requires of them:
/// valid, live handles obtained from the runtime, user pointers only where a
/// user address is expected, and the locking and sleeping context the
/// primitive documents.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Runtime {
    /// `BUG()`
    unsafe fn bug(&self);

    /// `copy_from_user()`. Returns the number of bytes not copied.
    unsafe fn copy_from_user(&self, to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;

    /// `copy_to_user()`. Returns the number of bytes not copied.
    unsafe fn copy_to_user(&self, to: *mut c_void, from: *const c_void, n: c_ulong) -> c_ulong;

    /// `clear_user()`. Returns the number of bytes not cleared.
    unsafe fn clear_user(&self, to: *mut c_void, n: c_ulong) -> c_ulong;

    /// `__spin_lock_init()`, the lock-debugging initializer.
    unsafe fn debug_spin_lock_init(
        &self,
        lock: *mut spinlock_t,
        name: *const c_char,
        key: *mut lock_class_key,
    );

    /// `spin_lock_init()`
    unsafe fn spin_lock_init(&self, lock: *mut spinlock_t);

    /// `spin_lock()`
    unsafe fn spin_lock(&self, lock: *mut spinlock_t);

    /// `spin_unlock()`
    unsafe fn spin_unlock(&self, lock: *mut spinlock_t);

    /// `init_wait()`
    unsafe fn init_wait(&self, entry: *mut wait_queue_entry);

    /// `current->pid`
    unsafe fn current_pid(&self) -> c_int;

    /// `signal_pending(current)`
    unsafe fn signal_pending(&self) -> c_int;

    /// `alloc_pages()`. Null on failure.
    unsafe fn alloc_pages(&self, gfp_mask: gfp_t, order: c_uint) -> *mut page;

    /// `kmap()`
    unsafe fn kmap(&self, page: *mut page) -> *mut c_void;

    /// `kunmap()`
    unsafe fn kunmap(&self, page: *mut page);

    /// `cond_resched()`. Non-zero if the task was rescheduled.
    unsafe fn cond_resched(&self) -> c_int;

    /// `copy_from_iter()`. Returns the number of bytes copied.
    unsafe fn copy_from_iter(&self, addr: *mut c_void, bytes: size_t, i: *mut iov_iter) -> size_t;

    /// `copy_to_iter()`. Returns the number of bytes copied.
    unsafe fn copy_to_iter(&self, addr: *const c_void, bytes: size_t, i: *mut iov_iter) -> size_t;

    /// `netdev_priv()`
    unsafe fn netdev_priv(&self, dev: *mut net_device) -> *mut c_void;

    /// `eth_hw_addr_random()`
    unsafe fn eth_hw_addr_random(&self, dev: *mut net_device);

    /// `netdev_alloc_pcpu_stats(struct pcpu_lstats)`. Null on failure.
    unsafe fn netdev_alloc_pcpu_stats(&self) -> *mut pcpu_lstats;

    /// Stores `stats` into `dev->lstats`.
    unsafe fn netdev_set_lstats(&self, dev: *mut net_device, stats: *mut pcpu_lstats);

    /// `dev_lstats_add()`
    unsafe fn dev_lstats_add(&self, dev: *mut net_device, len: c_uint);

    /// Reads `dev->lstats`.
    unsafe fn netdev_lstats(&self, dev: *mut net_device) -> *mut pcpu_lstats;

    /// `dev_lstats_read()`
    unsafe fn dev_lstats_read(&self, dev: *mut net_device, packets: *mut u64, bytes: *mut u64);

    /// `__free_pages()`
    unsafe fn free_pages(&self, page: *mut page, order: c_uint);

    /// `free_percpu()`
    unsafe fn free_percpu(&self, ptr: *mut c_void);

    /// `rtnl_lock()`
    unsafe fn rtnl_lock(&self);

    /// `rtnl_unlock()`
    unsafe fn rtnl_unlock(&self);

    /// `rtnl_link_register()`. Zero or a negative errno.
    unsafe fn rtnl_link_register(&self, ops: *mut rtnl_link_ops) -> c_int;

    /// `rtnl_link_unregister()`
    unsafe fn rtnl_link_unregister(&self, ops: *mut rtnl_link_ops);

    /// Reads `skb->len`.
    unsafe fn skb_len(&self, skb: *mut sk_buff) -> c_uint;

    /// `skb_tx_timestamp()`
    unsafe fn skb_tx_timestamp(&self, skb: *mut sk_buff);

    /// `consume_skb()`
    unsafe fn consume_skb(&self, skb: *mut sk_buff);
}
