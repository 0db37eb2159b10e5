// SPDX-License-Identifier: GPL-2.0

//! Spinlock over a runtime-owned lock.
//!
//! The lock word lives in runtime memory (usually embedded in a C struct);
//! [`SpinLock`] only remembers where it is and owns the protected data.

use core::cell::UnsafeCell;
use core::ffi::CStr;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use kbridge_api::bindings::{lock_class_key, spinlock_t};
use kbridge_helpers::{helpers, Runtime};

/// Data of type `T` protected by a runtime spinlock.
pub struct SpinLock<T> {
    lock: *mut spinlock_t,
    data: UnsafeCell<T>,
}

// SAFETY: the runtime lock serializes access to `data`.
unsafe impl<T: Send> Send for SpinLock<T> {}
// SAFETY: as above; `lock()` hands out exclusive access only.
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    /// Wraps the lock at `lock` around `data`.
    ///
    /// # Safety
    ///
    /// `lock` must point to a live `spinlock_t` that outlives the returned
    /// value, no other code may take it, and [`init`](Self::init) must be
    /// called before the first [`lock`](Self::lock).
    pub unsafe fn new(lock: *mut spinlock_t, data: T) -> Self {
        Self {
            lock,
            data: UnsafeCell::new(data),
        }
    }

    /// Initializes the runtime lock.
    ///
    /// `name` and `key` are recorded only by the lock-debugging variant.
    ///
    /// # Safety
    ///
    /// `key` must point to a lock class key that lives for the rest of the
    /// program. The lock must not be held.
    pub unsafe fn init<R: Runtime + ?Sized>(
        &self,
        rt: &R,
        name: &'static CStr,
        key: *mut lock_class_key,
    ) {
        unsafe { helpers::spin_lock_init(rt, self.lock, name.as_ptr(), key) }
    }

    /// Takes the lock. It is released when the guard drops.
    pub fn lock<'a, R: Runtime + ?Sized>(&'a self, rt: &'a R) -> SpinLockGuard<'a, T, R> {
        // SAFETY: `lock` is live and initialized by the constructor's contract.
        unsafe { helpers::spin_lock(rt, self.lock) };
        SpinLockGuard {
            lock: self,
            rt,
            _not_send: PhantomData,
        }
    }

    /// The runtime handle.
    pub fn as_raw(&self) -> *mut spinlock_t {
        self.lock
    }

    /// Mutable access without locking; `&mut self` proves exclusivity.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

/// Exclusive access to the data of a held [`SpinLock`].
///
/// Not `Send`: the lock must be released on the CPU that took it.
#[must_use = "the lock unlocks immediately when the guard is unused"]
pub struct SpinLockGuard<'a, T, R: Runtime + ?Sized> {
    lock: &'a SpinLock<T>,
    rt: &'a R,
    _not_send: PhantomData<*mut ()>,
}

impl<T, R: Runtime + ?Sized> Deref for SpinLockGuard<'_, T, R> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the lock is held for the guard's lifetime.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T, R: Runtime + ?Sized> DerefMut for SpinLockGuard<'_, T, R> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: the lock is held for the guard's lifetime.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T, R: Runtime + ?Sized> Drop for SpinLockGuard<'_, T, R> {
    fn drop(&mut self) {
        // SAFETY: this guard took the lock.
        unsafe { helpers::spin_unlock(self.rt, self.lock.lock) };
    }
}
