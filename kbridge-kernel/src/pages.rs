// SPDX-License-Identifier: GPL-2.0

//! Page allocations.
//!
//! [`Pages`] owns `2^ORDER` contiguous pages from the runtime allocator and
//! frees them on drop. Contents are reached through a temporary kernel
//! mapping of the first page.

use core::ptr;

use kbridge_api::bindings::{c_void, page, PAGE_SIZE};
use kbridge_api::{kb_warn, Error, GfpFlags, Result};
use kbridge_helpers::{helpers, Runtime};

/// `2^ORDER` pages owned by the caller.
pub struct Pages<'a, R: Runtime + ?Sized, const ORDER: u32> {
    pages: *mut page,
    rt: &'a R,
}

impl<'a, R: Runtime + ?Sized, const ORDER: u32> Pages<'a, R, ORDER> {
    /// Size of the whole allocation in bytes.
    pub const SIZE: usize = PAGE_SIZE << ORDER;

    /// Allocates pages with the given flags.
    pub fn new(rt: &'a R, flags: GfpFlags) -> Result<Self> {
        // SAFETY: only values cross; the flags are well formed by construction.
        let pages = unsafe { helpers::alloc_pages(rt, flags.as_raw(), ORDER) };
        if pages.is_null() {
            kb_warn!("alloc_pages(order {}, gfp {:#x}) failed", ORDER, flags.bits());
            return Err(Error::OutOfMemory);
        }
        Ok(Self { pages, rt })
    }

    /// Maps the first page into kernel address space until the mapping drops.
    pub fn kmap(&self) -> PageMapping<'_, R> {
        // SAFETY: `pages` is a live allocation owned by `self`.
        let ptr = unsafe { helpers::kmap(self.rt, self.pages) };
        PageMapping {
            page: self.pages,
            ptr,
            rt: self.rt,
        }
    }

    /// Copies `data` into the first page at `offset`.
    pub fn write(&self, data: &[u8], offset: usize) -> Result<()> {
        check_range(offset, data.len())?;
        let mapping = self.kmap();
        // SAFETY: the range was checked to lie inside the mapped page.
        unsafe {
            ptr::copy_nonoverlapping(
                data.as_ptr(),
                mapping.as_ptr().cast::<u8>().add(offset),
                data.len(),
            )
        };
        Ok(())
    }

    /// Copies from the first page at `offset` into `out`.
    pub fn read(&self, out: &mut [u8], offset: usize) -> Result<()> {
        check_range(offset, out.len())?;
        let mapping = self.kmap();
        // SAFETY: the range was checked to lie inside the mapped page.
        unsafe {
            ptr::copy_nonoverlapping(
                mapping.as_ptr().cast::<u8>().add(offset),
                out.as_mut_ptr(),
                out.len(),
            )
        };
        Ok(())
    }

    pub fn as_raw(&self) -> *mut page {
        self.pages
    }
}

fn check_range(offset: usize, len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= PAGE_SIZE => Ok(()),
        _ => Err(Error::InvalidArgument),
    }
}

impl<R: Runtime + ?Sized, const ORDER: u32> Drop for Pages<'_, R, ORDER> {
    fn drop(&mut self) {
        // SAFETY: allocated with the same order and not freed elsewhere.
        unsafe { self.rt.free_pages(self.pages, ORDER) };
    }
}

/// A live kernel mapping of a page.
#[must_use = "the page is unmapped immediately when the mapping is unused"]
pub struct PageMapping<'a, R: Runtime + ?Sized> {
    page: *mut page,
    ptr: *mut c_void,
    rt: &'a R,
}

impl<R: Runtime + ?Sized> PageMapping<'_, R> {
    /// Kernel virtual address of the page.
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }
}

impl<R: Runtime + ?Sized> Drop for PageMapping<'_, R> {
    fn drop(&mut self) {
        // SAFETY: mapped by `Pages::kmap` and not unmapped elsewhere.
        unsafe { helpers::kunmap(self.rt, self.page) };
    }
}
