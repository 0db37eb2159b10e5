// SPDX-License-Identifier: GPL-2.0

//! Netlink attributes.
//!
//! The runtime parses a netlink message into an array of attribute pointers
//! indexed by attribute type, with null for absent attributes. [`NlAttrVec`]
//! reads that array; [`NlAttr`] reads one attribute.

use core::marker::PhantomData;
use core::slice;

use kbridge_api::bindings::{nlattr, ETH_ALEN, IFLA_ADDRESS, IFLA_MAX, NLA_HDRLEN};
use kbridge_api::{kb_debug, Error, Result};

use super::ether::{is_valid_ether_addr, EtherAddr};

/// One netlink attribute, possibly absent.
#[derive(Clone, Copy)]
pub struct NlAttr<'a> {
    ptr: *const nlattr,
    _attr: PhantomData<&'a nlattr>,
}

impl<'a> NlAttr<'a> {
    /// # Safety
    ///
    /// `ptr` must be null or point to an attribute whose header and
    /// `nla_len - NLA_HDRLEN` payload bytes stay valid for `'a`.
    pub unsafe fn from_raw(ptr: *const nlattr) -> Self {
        Self {
            ptr,
            _attr: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Attribute type, or 0 when absent.
    pub fn nla_type(&self) -> u16 {
        // SAFETY: non-null pointers are valid by the constructor's contract.
        unsafe { self.ptr.as_ref() }.map_or(0, |attr| attr.nla_type)
    }

    /// Payload length in bytes, or 0 when absent.
    pub fn payload_len(&self) -> usize {
        // SAFETY: non-null pointers are valid by the constructor's contract.
        unsafe { self.ptr.as_ref() }
            .map_or(0, |attr| usize::from(attr.nla_len).saturating_sub(NLA_HDRLEN))
    }

    /// The bytes after the header.
    pub fn payload(&self) -> &'a [u8] {
        let len = self.payload_len();
        if len == 0 {
            return &[];
        }
        // SAFETY: the payload follows the header and is `len` bytes long.
        unsafe { slice::from_raw_parts(self.ptr.cast::<u8>().add(NLA_HDRLEN), len) }
    }

    /// The payload as an ethernet address, if it is exactly that long.
    pub fn ether_addr(&self) -> Option<EtherAddr> {
        self.payload().try_into().ok()
    }
}

/// Number of slots in a link attribute table.
pub const IFLA_TABLE_LEN: usize = IFLA_MAX as usize + 1;

/// Parsed attribute table indexed by attribute type.
pub struct NlAttrVec<'a> {
    ptr: *const *const nlattr,
    _table: PhantomData<&'a [NlAttr<'a>]>,
}

impl<'a> NlAttrVec<'a> {
    /// # Safety
    ///
    /// `ptr` must point to [`IFLA_TABLE_LEN`] attribute pointers, each satisfying
    /// [`NlAttr::from_raw`], valid for `'a`.
    pub unsafe fn from_raw(ptr: *const *const nlattr) -> Self {
        Self {
            ptr,
            _table: PhantomData,
        }
    }

    /// The attribute of type `ty`, if present.
    pub fn get(&self, ty: u16) -> Option<NlAttr<'a>> {
        if ty > IFLA_MAX {
            return None;
        }
        // SAFETY: `ty` is within the table and each slot is a valid pointer.
        let attr = unsafe { NlAttr::from_raw(*self.ptr.add(usize::from(ty))) };
        (!attr.is_null()).then_some(attr)
    }
}

/// Checks an optional `IFLA_ADDRESS` in a link request.
///
/// A payload that is not [`ETH_ALEN`] bytes is [`Error::InvalidArgument`];
/// a multicast or all-zero address is [`Error::AddressNotAvailable`].
pub fn validate_ether_address(tb: &NlAttrVec<'_>) -> Result<()> {
    let Some(attr) = tb.get(IFLA_ADDRESS) else {
        return Ok(());
    };
    if attr.payload_len() != ETH_ALEN {
        kb_debug!("IFLA_ADDRESS payload is {} bytes", attr.payload_len());
        return Err(Error::InvalidArgument);
    }
    match attr.ether_addr() {
        Some(addr) if is_valid_ether_addr(&addr) => Ok(()),
        _ => Err(Error::AddressNotAvailable),
    }
}
