//! API tests

use core::mem::size_of;

use kbridge_api::bindings::{self, c_ulong, size_t, uintptr_t};
use kbridge_api::{Error, GfpFlags};

#[test]
fn test_size_and_pointer_widths_match() {
    // Mirrors the compile-time guard so a regression shows up by name.
    #[cfg(not(target_arch = "arm"))]
    {
        assert_eq!(size_of::<size_t>(), size_of::<uintptr_t>());
        assert_eq!(size_of::<c_ulong>(), size_of::<usize>());
    }
    assert_eq!(size_of::<uintptr_t>(), size_of::<*const u8>());
}

#[test]
fn test_error_display() {
    assert_eq!(Error::OutOfMemory.to_string(), "Out of memory");
    assert_eq!(Error::Unknown(95).to_string(), "Unknown error: 95");
}

#[test]
fn test_every_named_error_round_trips() {
    let errors = [
        Error::OutOfMemory,
        Error::Fault,
        Error::InvalidArgument,
        Error::AddressNotAvailable,
        Error::Interrupted,
        Error::Busy,
    ];
    for err in errors {
        assert!(err.to_errno() < 0);
        assert_eq!(Error::from_errno(err.to_errno()), err);
    }
}

#[test]
fn test_gfp_kernel_matches_runtime_value() {
    assert_eq!(bindings::gfp_t::from(GfpFlags::KERNEL), 0xcc0);
}
