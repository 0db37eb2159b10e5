// SPDX-License-Identifier: GPL-2.0

//! Wait queue entries.

use kbridge_api::bindings::wait_queue_entry;
use kbridge_helpers::{helpers, Runtime};

/// A runtime-owned wait queue entry.
pub struct WaitEntry {
    entry: *mut wait_queue_entry,
}

impl WaitEntry {
    /// # Safety
    ///
    /// `entry` must point to a live `wait_queue_entry` that is not on any
    /// queue and outlives the returned value.
    pub unsafe fn from_raw(entry: *mut wait_queue_entry) -> Self {
        Self { entry }
    }

    /// Prepares the entry to wait on behalf of the current task.
    pub fn init<R: Runtime + ?Sized>(&self, rt: &R) {
        // SAFETY: `entry` is live and off-queue by the constructor's contract.
        unsafe { helpers::init_wait(rt, self.entry) }
    }

    pub fn as_raw(&self) -> *mut wait_queue_entry {
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbridge_helpers::MockRuntime;

    #[test]
    fn test_init_forwards_entry() {
        let mut rt = MockRuntime::new();
        rt.expect_init_wait()
            .withf(|entry| *entry as usize == 0x5000)
            .times(1)
            .return_const(());

        let entry = unsafe { WaitEntry::from_raw(0x5000 as *mut wait_queue_entry) };
        entry.init(&rt);
        assert_eq!(entry.as_raw() as usize, 0x5000);
    }
}
