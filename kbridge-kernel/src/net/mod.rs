// SPDX-License-Identifier: GPL-2.0

//! Networking.
//!
//! Ethernet address checks, netlink attribute access, network devices and
//! their packets, and routing netlink.

pub mod device;
pub mod ether;
pub mod netlink;
pub mod rtnl;
pub mod skbuff;

pub use self::device::NetDevice;
pub use self::ether::{is_valid_ether_addr, EtherAddr};
pub use self::netlink::{NlAttr, NlAttrVec};
pub use self::rtnl::{RtnlLinkOps, RtnlLinkStats64, RtnlLock};
pub use self::skbuff::SkBuff;
