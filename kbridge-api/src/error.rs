// SPDX-License-Identifier: GPL-2.0

//! Error handling module for the kernel helper bridge
//!
//! The runtime reports failure as negative errno values. [`Error`] names the
//! codes Rust callers branch on and keeps everything else as
//! [`Error::Unknown`], so any errno up to `MAX_ERRNO` survives a round trip.

use core::fmt;

use crate::bindings::{c_int, EADDRNOTAVAIL, EBUSY, EFAULT, EINTR, EINVAL, ENOMEM, MAX_ERRNO};

/// Common error type used throughout the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Not enough memory (`ENOMEM`)
    OutOfMemory,
    /// Bad address, or a user copy that stopped short (`EFAULT`)
    Fault,
    /// Invalid argument (`EINVAL`)
    InvalidArgument,
    /// Address not available (`EADDRNOTAVAIL`)
    AddressNotAvailable,
    /// Interrupted by a signal (`EINTR`)
    Interrupted,
    /// Resource busy (`EBUSY`)
    Busy,
    /// Any other errno, stored as a positive value
    Unknown(i32),
}

impl Error {
    /// Builds an error from an errno value. Either sign is accepted.
    ///
    /// Zero and values outside `1..=MAX_ERRNO` are not errnos and become
    /// [`Error::InvalidArgument`].
    pub fn from_errno(errno: c_int) -> Self {
        let code = match c_int::try_from(errno.unsigned_abs()) {
            Ok(code @ 1..=MAX_ERRNO) => code,
            _ => return Error::InvalidArgument,
        };
        match code {
            ENOMEM => Error::OutOfMemory,
            EFAULT => Error::Fault,
            EINVAL => Error::InvalidArgument,
            EADDRNOTAVAIL => Error::AddressNotAvailable,
            EINTR => Error::Interrupted,
            EBUSY => Error::Busy,
            other => Error::Unknown(other),
        }
    }

    /// Returns the negative errno the runtime uses for this error.
    pub fn to_errno(self) -> c_int {
        let errno = match self {
            Error::OutOfMemory => ENOMEM,
            Error::Fault => EFAULT,
            Error::InvalidArgument => EINVAL,
            Error::AddressNotAvailable => EADDRNOTAVAIL,
            Error::Interrupted => EINTR,
            Error::Busy => EBUSY,
            Error::Unknown(code @ 1..=MAX_ERRNO) => code,
            Error::Unknown(_) => EINVAL,
        };
        -errno
    }

    /// Interprets a "zero or negative errno" return value.
    pub fn from_kernel_result(ret: c_int) -> Result<()> {
        if ret < 0 {
            Err(Error::from_errno(ret))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::Fault => write!(f, "Bad address"),
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::AddressNotAvailable => write!(f, "Address not available"),
            Error::Interrupted => write!(f, "Interrupted system call"),
            Error::Busy => write!(f, "Resource busy"),
            Error::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for operations that can fail
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_errno_accepts_both_signs() {
        assert_eq!(Error::from_errno(-ENOMEM), Error::OutOfMemory);
        assert_eq!(Error::from_errno(ENOMEM), Error::OutOfMemory);
        assert_eq!(Error::from_errno(-EADDRNOTAVAIL), Error::AddressNotAvailable);
    }

    #[test]
    fn test_unknown_errno_round_trips() {
        let err = Error::from_errno(-95);
        assert_eq!(err, Error::Unknown(95));
        assert_eq!(err.to_errno(), -95);
    }

    #[test]
    fn test_out_of_range_errno_is_invalid_argument() {
        assert_eq!(Error::from_errno(i32::MIN), Error::InvalidArgument);
        assert_eq!(Error::from_errno(i32::MIN).to_errno(), -EINVAL);
        assert_eq!(Error::from_errno(MAX_ERRNO + 1), Error::InvalidArgument);
        assert_eq!(Error::from_errno(-MAX_ERRNO), Error::Unknown(MAX_ERRNO));
    }

    #[test]
    fn test_zero_is_not_an_error_code() {
        assert_eq!(Error::from_errno(0), Error::InvalidArgument);
        assert_ne!(Error::from_errno(0).to_errno(), 0);
    }

    #[test]
    fn test_hand_built_unknown_never_reads_as_success() {
        assert_eq!(Error::Unknown(0).to_errno(), -EINVAL);
        assert_eq!(Error::Unknown(i32::MIN).to_errno(), -EINVAL);
        assert_eq!(Error::Unknown(-5).to_errno(), -EINVAL);
    }

    #[test]
    fn test_to_errno_is_negative() {
        assert_eq!(Error::Fault.to_errno(), -EFAULT);
        assert_eq!(Error::Interrupted.to_errno(), -EINTR);
    }

    #[test]
    fn test_from_kernel_result() {
        assert_eq!(Error::from_kernel_result(0), Ok(()));
        assert_eq!(Error::from_kernel_result(3), Ok(()));
        assert_eq!(Error::from_kernel_result(-EINVAL), Err(Error::InvalidArgument));
    }
}
