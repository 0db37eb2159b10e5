// SPDX-License-Identifier: GPL-2.0

//! User space pointers.
//!
//! A [`UserSlicePtr`] is a user address plus the number of bytes the caller
//! may touch there. Reads and writes go through a cursor that only advances
//! when the runtime copied every byte.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use kbridge_api::bindings::{c_ulong, c_void};
use kbridge_api::{kb_debug, Error, Result};
use kbridge_helpers::{helpers, Runtime};

/// A region of user memory.
pub struct UserSlicePtr(*mut c_void, usize);

impl UserSlicePtr {
    /// Constructs a user slice from a raw pointer and a length in bytes.
    ///
    /// # Safety
    ///
    /// `ptr` must be a user address for the current task. It is never
    /// dereferenced directly, only handed to the user-copy primitives, so it
    /// may be invalid; those primitives report the fault.
    pub unsafe fn new(ptr: *mut c_void, length: usize) -> Self {
        UserSlicePtr(ptr, length)
    }

    /// Reads the entire region into a freshly allocated buffer.
    #[cfg(feature = "alloc")]
    pub fn read_all<R: Runtime + ?Sized>(self, rt: &R) -> Result<Vec<u8>> {
        self.reader().read_all(rt)
    }

    /// Writes `data` to the start of the region.
    pub fn write_all<R: Runtime + ?Sized>(self, rt: &R, data: &[u8]) -> Result<()> {
        self.writer().write_slice(rt, data)
    }

    pub fn reader(self) -> UserSlicePtrReader {
        UserSlicePtrReader(self.0, self.1)
    }

    pub fn writer(self) -> UserSlicePtrWriter {
        UserSlicePtrWriter(self.0, self.1)
    }

    /// Splits into a reader and a writer over the same region.
    pub fn reader_writer(self) -> (UserSlicePtrReader, UserSlicePtrWriter) {
        (
            UserSlicePtrReader(self.0, self.1),
            UserSlicePtrWriter(self.0, self.1),
        )
    }
}

/// Converts a byte count for the user-copy primitives.
fn user_len(len: usize, remaining: usize) -> Result<c_ulong> {
    if len > remaining {
        kb_debug!("user copy of {} bytes exceeds the {} remaining", len, remaining);
        return Err(Error::Fault);
    }
    c_ulong::try_from(len).map_err(|_| Error::Fault)
}

/// Reading cursor over a [`UserSlicePtr`].
pub struct UserSlicePtrReader(*mut c_void, usize);

impl UserSlicePtrReader {
    /// Bytes left to read.
    pub fn len(&self) -> usize {
        self.1
    }

    pub fn is_empty(&self) -> bool {
        self.1 == 0
    }

    /// Fills `data` from user memory.
    ///
    /// Fails with [`Error::Fault`] if `data` is longer than what remains or
    /// the runtime could not copy every byte. The cursor does not move on
    /// failure.
    pub fn read_slice<R: Runtime + ?Sized>(&mut self, rt: &R, data: &mut [u8]) -> Result<()> {
        // SAFETY: `data` is valid for `data.len()` bytes of writes.
        unsafe { self.read_raw(rt, data.as_mut_ptr(), data.len()) }
    }

    /// Copies `len` bytes of user memory to `out`.
    ///
    /// # Safety
    ///
    /// `out` must be valid for writes of `len` bytes.
    pub unsafe fn read_raw<R: Runtime + ?Sized>(
        &mut self,
        rt: &R,
        out: *mut u8,
        len: usize,
    ) -> Result<()> {
        let n = user_len(len, self.1)?;
        let left = unsafe { helpers::copy_from_user(rt, out.cast(), self.0, n) };
        if left != 0 {
            kb_debug!("copy_from_user left {} of {} bytes", left, len);
            return Err(Error::Fault);
        }
        self.0 = self.0.wrapping_byte_add(len);
        self.1 -= len;
        Ok(())
    }

    /// Reads everything that remains.
    #[cfg(feature = "alloc")]
    pub fn read_all<R: Runtime + ?Sized>(&mut self, rt: &R) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.1).map_err(|_| Error::OutOfMemory)?;
        data.resize(self.1, 0);
        self.read_slice(rt, &mut data)?;
        Ok(data)
    }
}

/// Writing cursor over a [`UserSlicePtr`].
pub struct UserSlicePtrWriter(*mut c_void, usize);

impl UserSlicePtrWriter {
    /// Bytes left to write.
    pub fn len(&self) -> usize {
        self.1
    }

    pub fn is_empty(&self) -> bool {
        self.1 == 0
    }

    /// Copies `data` to user memory.
    pub fn write_slice<R: Runtime + ?Sized>(&mut self, rt: &R, data: &[u8]) -> Result<()> {
        // SAFETY: `data` is valid for `data.len()` bytes of reads.
        unsafe { self.write_raw(rt, data.as_ptr(), data.len()) }
    }

    /// Copies `len` bytes from `data` to user memory.
    ///
    /// # Safety
    ///
    /// `data` must be valid for reads of `len` bytes.
    pub unsafe fn write_raw<R: Runtime + ?Sized>(
        &mut self,
        rt: &R,
        data: *const u8,
        len: usize,
    ) -> Result<()> {
        let n = user_len(len, self.1)?;
        let left = unsafe { helpers::copy_to_user(rt, self.0, data.cast(), n) };
        if left != 0 {
            kb_debug!("copy_to_user left {} of {} bytes", left, len);
            return Err(Error::Fault);
        }
        self.0 = self.0.wrapping_byte_add(len);
        self.1 -= len;
        Ok(())
    }

    /// Zeroes the next `len` bytes of user memory.
    pub fn clear<R: Runtime + ?Sized>(&mut self, rt: &R, len: usize) -> Result<()> {
        let n = user_len(len, self.1)?;
        // SAFETY: the address is a user address by the constructor's contract.
        let left = unsafe { helpers::clear_user(rt, self.0, n) };
        if left != 0 {
            kb_debug!("clear_user left {} of {} bytes", left, len);
            return Err(Error::Fault);
        }
        self.0 = self.0.wrapping_byte_add(len);
        self.1 -= len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbridge_helpers::MockRuntime;
    use mockall::Sequence;

    fn user(addr: usize, len: usize) -> UserSlicePtr {
        unsafe { UserSlicePtr::new(addr as *mut c_void, len) }
    }

    #[test]
    fn test_read_slice_advances_cursor() {
        let mut rt = MockRuntime::new();
        let mut seq = Sequence::new();
        rt.expect_copy_from_user()
            .withf(|_, from, n| *from as usize == 0x1000 && *n == 4)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|to, _, n| {
                unsafe { core::ptr::write_bytes(to.cast::<u8>(), 0xab, n as usize) };
                0
            });
        rt.expect_copy_from_user()
            .withf(|_, from, n| *from as usize == 0x1004 && *n == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| 0);

        let mut reader = user(0x1000, 8).reader();
        let mut buf = [0u8; 4];
        reader.read_slice(&rt, &mut buf).unwrap();
        assert_eq!(buf, [0xab; 4]);
        assert_eq!(reader.len(), 4);

        reader.read_slice(&rt, &mut [0u8; 2]).unwrap();
        assert_eq!(reader.len(), 2);
    }

    #[test]
    fn test_read_past_end_faults_without_copy() {
        let rt = MockRuntime::new();
        let mut reader = user(0x1000, 3).reader();
        assert_eq!(reader.read_slice(&rt, &mut [0u8; 4]), Err(Error::Fault));
        assert_eq!(reader.len(), 3);
    }

    #[test]
    fn test_short_copy_faults_and_keeps_cursor() {
        let mut rt = MockRuntime::new();
        rt.expect_copy_from_user().times(1).returning(|_, _, _| 1);

        let mut reader = user(0x1000, 8).reader();
        assert_eq!(reader.read_slice(&rt, &mut [0u8; 8]), Err(Error::Fault));
        assert_eq!(reader.len(), 8);
    }

    #[test]
    fn test_write_and_clear() {
        let mut rt = MockRuntime::new();
        rt.expect_copy_to_user()
            .withf(|to, _, n| *to as usize == 0x2000 && *n == 3)
            .times(1)
            .returning(|_, _, _| 0);
        rt.expect_clear_user()
            .withf(|to, n| *to as usize == 0x2003 && *n == 5)
            .times(1)
            .returning(|_, _| 0);

        let mut writer = user(0x2000, 8).writer();
        writer.write_slice(&rt, b"abc").unwrap();
        writer.clear(&rt, 5).unwrap();
        assert!(writer.is_empty());
    }

    #[test]
    fn test_clear_reports_fault() {
        let mut rt = MockRuntime::new();
        rt.expect_clear_user().times(1).returning(|_, n| n);

        let mut writer = user(0x2000, 8).writer();
        assert_eq!(writer.clear(&rt, 8), Err(Error::Fault));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_read_all() {
        let mut rt = MockRuntime::new();
        rt.expect_copy_from_user()
            .withf(|_, _, n| *n == 5)
            .times(1)
            .returning(|to, _, n| {
                unsafe { core::ptr::write_bytes(to.cast::<u8>(), 7, n as usize) };
                0
            });

        assert_eq!(user(0x3000, 5).read_all(&rt).unwrap(), vec![7u8; 5]);
    }
}
