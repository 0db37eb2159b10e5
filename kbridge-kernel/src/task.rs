// SPDX-License-Identifier: GPL-2.0

//! The current task.

use kbridge_api::bindings::c_int;
use kbridge_api::{kb_trace, Error, Result};
use kbridge_helpers::{helpers, Runtime};

/// Process identifier
pub type Pid = c_int;

/// Operations on the task that is running this code.
pub struct Task;

impl Task {
    /// PID of the current task.
    pub fn current_pid<R: Runtime + ?Sized>(rt: &R) -> Pid {
        // SAFETY: takes no pointers; valid in any task context.
        unsafe { helpers::current_pid(rt) }
    }

    /// Whether the current task has a signal pending.
    pub fn signal_pending<R: Runtime + ?Sized>(rt: &R) -> bool {
        // SAFETY: takes no pointers; valid in any task context.
        unsafe { helpers::signal_pending(rt) != 0 }
    }

    /// Fails with [`Error::Interrupted`] if a signal is pending.
    pub fn check_signal<R: Runtime + ?Sized>(rt: &R) -> Result<()> {
        if Self::signal_pending(rt) {
            kb_trace!("pid {} interrupted by signal", Self::current_pid(rt));
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    /// Yields the CPU if a reschedule is due. Returns whether it did.
    ///
    /// Must not be called with a spinlock held.
    pub fn cond_resched<R: Runtime + ?Sized>(rt: &R) -> bool {
        // SAFETY: takes no pointers. The sleeping-context rule is on the caller.
        unsafe { helpers::cond_resched(rt) != 0 }
    }
}
