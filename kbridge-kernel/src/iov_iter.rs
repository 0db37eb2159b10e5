// SPDX-License-Identifier: GPL-2.0

//! I/O vector iterators.

use kbridge_api::bindings::iov_iter;
use kbridge_api::{kb_debug, Error, Result};
use kbridge_helpers::{helpers, Runtime};

/// A runtime-owned `iov_iter` cursor.
pub struct IovIter {
    iter: *mut iov_iter,
}

impl IovIter {
    /// # Safety
    ///
    /// `iter` must point to a live `iov_iter` that nothing else advances
    /// while the returned value exists.
    pub unsafe fn from_raw(iter: *mut iov_iter) -> Self {
        Self { iter }
    }

    /// Fills `data` from the iterator. Returns the number of bytes copied.
    ///
    /// A short copy is [`Error::Fault`]; the iterator has still advanced by
    /// what was copied.
    pub fn copy_from_iter<R: Runtime + ?Sized>(&mut self, rt: &R, data: &mut [u8]) -> Result<usize> {
        // SAFETY: `data` is writable for its length; `iter` is live.
        let copied =
            unsafe { helpers::copy_from_iter(rt, data.as_mut_ptr().cast(), data.len(), self.iter) };
        check_copied(copied, data.len())
    }

    /// Appends `data` to the iterator. Returns the number of bytes copied.
    pub fn copy_to_iter<R: Runtime + ?Sized>(&mut self, rt: &R, data: &[u8]) -> Result<usize> {
        // SAFETY: `data` is readable for its length; `iter` is live.
        let copied =
            unsafe { helpers::copy_to_iter(rt, data.as_ptr().cast(), data.len(), self.iter) };
        check_copied(copied, data.len())
    }

    pub fn as_raw(&self) -> *mut iov_iter {
        self.iter
    }
}

fn check_copied(copied: usize, wanted: usize) -> Result<usize> {
    if copied != wanted {
        kb_debug!("iov_iter copied {} of {} bytes", copied, wanted);
        return Err(Error::Fault);
    }
    Ok(copied)
}
