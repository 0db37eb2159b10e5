// SPDX-License-Identifier: GPL-2.0

//! Forwarding entry points.
//!
//! Each function hands its arguments to the [`Runtime`] primitive of the same
//! purpose and returns its result unchanged. They are the bodies of the
//! `rust_helper_*` symbols emitted by [`export_helpers!`](crate::export_helpers).
//!
//! # Safety
//!
//! All functions are `unsafe` for the reason documented on [`Runtime`]: the
//! handles go straight to the runtime without any checking here.

use kbridge_api::bindings::{
    c_char, c_int, c_uint, c_ulong, c_void, gfp_t, iov_iter, lock_class_key, net_device, page,
    size_t, spinlock_t, wait_queue_entry, ENOMEM,
};

use crate::runtime::Runtime;

#[inline]
pub unsafe fn bug<R: Runtime + ?Sized>(rt: &R) {
    unsafe { rt.bug() }
}

#[inline]
pub unsafe fn copy_from_user<R: Runtime + ?Sized>(
    rt: &R,
    to: *mut c_void,
    from: *const c_void,
    n: c_ulong,
) -> c_ulong {
    unsafe { rt.copy_from_user(to, from, n) }
}

#[inline]
pub unsafe fn copy_to_user<R: Runtime + ?Sized>(
    rt: &R,
    to: *mut c_void,
    from: *const c_void,
    n: c_ulong,
) -> c_ulong {
    unsafe { rt.copy_to_user(to, from, n) }
}

#[inline]
pub unsafe fn clear_user<R: Runtime + ?Sized>(rt: &R, to: *mut c_void, n: c_ulong) -> c_ulong {
    unsafe { rt.clear_user(to, n) }
}

/// Initializes `lock`.
///
/// With the `debug_spinlock` feature this goes through the lock-debugging
/// initializer, which records `name` and `key`. Otherwise both are ignored.
#[inline]
pub unsafe fn spin_lock_init<R: Runtime + ?Sized>(
    rt: &R,
    lock: *mut spinlock_t,
    name: *const c_char,
    key: *mut lock_class_key,
) {
    #[cfg(feature = "debug_spinlock")]
    unsafe {
        rt.debug_spin_lock_init(lock, name, key)
    }

    #[cfg(not(feature = "debug_spinlock"))]
    {
        let _ = (name, key);
        unsafe { rt.spin_lock_init(lock) }
    }
}

#[inline]
pub unsafe fn spin_lock<R: Runtime + ?Sized>(rt: &R, lock: *mut spinlock_t) {
    unsafe { rt.spin_lock(lock) }
}

#[inline]
pub unsafe fn spin_unlock<R: Runtime + ?Sized>(rt: &R, lock: *mut spinlock_t) {
    unsafe { rt.spin_unlock(lock) }
}

#[inline]
pub unsafe fn init_wait<R: Runtime + ?Sized>(rt: &R, entry: *mut wait_queue_entry) {
    unsafe { rt.init_wait(entry) }
}

#[inline]
pub unsafe fn current_pid<R: Runtime + ?Sized>(rt: &R) -> c_int {
    unsafe { rt.current_pid() }
}

#[inline]
pub unsafe fn signal_pending<R: Runtime + ?Sized>(rt: &R) -> c_int {
    unsafe { rt.signal_pending() }
}

#[inline]
pub unsafe fn alloc_pages<R: Runtime + ?Sized>(rt: &R, gfp_mask: gfp_t, order: c_uint) -> *mut page {
    unsafe { rt.alloc_pages(gfp_mask, order) }
}

#[inline]
pub unsafe fn kmap<R: Runtime + ?Sized>(rt: &R, page: *mut page) -> *mut c_void {
    unsafe { rt.kmap(page) }
}

#[inline]
pub unsafe fn kunmap<R: Runtime + ?Sized>(rt: &R, page: *mut page) {
    unsafe { rt.kunmap(page) }
}

#[inline]
pub unsafe fn cond_resched<R: Runtime + ?Sized>(rt: &R) -> c_int {
    unsafe { rt.cond_resched() }
}

#[inline]
pub unsafe fn copy_from_iter<R: Runtime + ?Sized>(
    rt: &R,
    addr: *mut c_void,
    bytes: size_t,
    i: *mut iov_iter,
) -> size_t {
    unsafe { rt.copy_from_iter(addr, bytes, i) }
}

#[inline]
pub unsafe fn copy_to_iter<R: Runtime + ?Sized>(
    rt: &R,
    addr: *const c_void,
    bytes: size_t,
    i: *mut iov_iter,
) -> size_t {
    unsafe { rt.copy_to_iter(addr, bytes, i) }
}

#[inline]
pub unsafe fn netdev_priv<R: Runtime + ?Sized>(rt: &R, dev: *mut net_device) -> *mut c_void {
    unsafe { rt.netdev_priv(dev) }
}

#[inline]
pub unsafe fn eth_hw_addr_random<R: Runtime + ?Sized>(rt: &R, dev: *mut net_device) {
    unsafe { rt.eth_hw_addr_random(dev) }
}

/// Gives `dev` a freshly allocated block of per-CPU packet counters.
///
/// The allocation result is stored in the device even when it is null.
/// Returns `-ENOMEM` if the allocation failed and `0` otherwise.
pub unsafe fn net_device_set_new_lstats<R: Runtime + ?Sized>(rt: &R, dev: *mut net_device) -> c_int {
    let stats = unsafe { rt.netdev_alloc_pcpu_stats() };
    unsafe { rt.netdev_set_lstats(dev, stats) };
    if stats.is_null() {
        return -ENOMEM;
    }

    0
}

#[inline]
pub unsafe fn dev_lstats_add<R: Runtime + ?Sized>(rt: &R, dev: *mut net_device, len: c_uint) {
    unsafe { rt.dev_lstats_add(dev, len) }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_copy_from_user_forwards(to in any::<usize>(), from in any::<usize>(), n in any::<c_ulong>(), left in any::<c_ulong>()) {
            let mut rt = MockRuntime::new();
            rt.expect_copy_from_user()
                .withf(move |t, f, len| *t as usize == to && *f as usize == from && *len == n)
                .times(1)
                .returning(move |_, _, _| left);

            let ret = unsafe { copy_from_user(&rt, to as *mut c_void, from as *const c_void, n) };
            prop_assert_eq!(ret, left);
        }

        #[test]
        fn prop_clear_user_forwards(to in any::<usize>(), n in any::<c_ulong>()) {
            let mut rt = MockRuntime::new();
            rt.expect_clear_user()
                .withf(move |t, len| *t as usize == to && *len == n)
                .times(1)
                .returning(|_, len| len);

            let ret = unsafe { clear_user(&rt, to as *mut c_void, n) };
            prop_assert_eq!(ret, n);
        }

        #[test]
        fn prop_copy_to_iter_forwards(addr in any::<usize>(), bytes in any::<usize>(), iter in any::<usize>(), done in any::<usize>()) {
            let mut rt = MockRuntime::new();
            rt.expect_copy_to_iter()
                .withf(move |a, b, i| *a as usize == addr && *b == bytes && *i as usize == iter)
                .times(1)
                .returning(move |_, _, _| done);

            let ret = unsafe {
                copy_to_iter(&rt, addr as *const c_void, bytes, iter as *mut iov_iter)
            };
            prop_assert_eq!(ret, done);
        }

        #[test]
        fn prop_alloc_pages_forwards(gfp in any::<c_uint>(), order in 0u32..11, handle in any::<usize>()) {
            let mut rt = MockRuntime::new();
            rt.expect_alloc_pages()
                .withf(move |g, o| *g == gfp && *o == order)
                .times(1)
                .returning(move |_, _| handle as *mut page);

            let ret = unsafe { alloc_pages(&rt, gfp, order) };
            prop_assert_eq!(ret as usize, handle);
        }

        #[test]
        fn prop_dev_lstats_add_forwards(dev in any::<usize>(), len in any::<c_uint>()) {
            let mut rt = MockRuntime::new();
            rt.expect_dev_lstats_add()
                .withf(move |d, l| *d as usize == dev && *l == len)
                .times(1)
                .return_const(());

            unsafe { dev_lstats_add(&rt, dev as *mut net_device, len) };
        }

        #[test]
        fn prop_set_new_lstats_status(dev in 1usize.., stats in any::<usize>()) {
            let mut rt = MockRuntime::new();
            rt.expect_netdev_alloc_pcpu_stats()
                .times(1)
                .returning(move || stats as *mut _);
            rt.expect_netdev_set_lstats()
                .withf(move |d, s| *d as usize == dev && *s as usize == stats)
                .times(1)
                .return_const(());

            let ret = unsafe { net_device_set_new_lstats(&rt, dev as *mut net_device) };
            prop_assert_eq!(ret, if stats == 0 { -ENOMEM } else { 0 });
        }
    }
}
