// SPDX-License-Identifier: GPL-2.0

//! Page allocator flags.

use bitflags::bitflags;

use crate::bindings::gfp_t;

bitflags! {
    /// Flags accepted by the runtime's page allocator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GfpFlags: gfp_t {
        /// Allocate from the DMA zone
        const DMA = 0x01;
        /// Allow highmem pages
        const HIGHMEM = 0x02;
        /// Allocate from the DMA32 zone
        const DMA32 = 0x04;
        /// Caller is high priority
        const HIGH = 0x20;
        /// Allocator may start physical IO
        const IO = 0x40;
        /// Allocator may call into the filesystem
        const FS = 0x80;
        /// Zero the returned pages
        const ZERO = 0x100;
        /// Caller cannot sleep
        const ATOMIC_BIT = 0x200;
        /// Allocator may enter direct reclaim
        const DIRECT_RECLAIM = 0x400;
        /// Allocator may wake kswapd
        const KSWAPD_RECLAIM = 0x800;

        /// Both reclaim modes
        const RECLAIM = Self::DIRECT_RECLAIM.bits() | Self::KSWAPD_RECLAIM.bits();
        /// Ordinary sleeping kernel allocation
        const KERNEL = Self::RECLAIM.bits() | Self::IO.bits() | Self::FS.bits();
        /// Allocation from atomic context
        const ATOMIC = Self::HIGH.bits() | Self::ATOMIC_BIT.bits() | Self::KSWAPD_RECLAIM.bits();
    }
}

impl GfpFlags {
    /// Returns the raw value handed to the runtime.
    pub const fn as_raw(self) -> gfp_t {
        self.bits()
    }
}

impl From<GfpFlags> for gfp_t {
    fn from(flags: GfpFlags) -> Self {
        flags.bits()
    }
}
