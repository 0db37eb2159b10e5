// SPDX-License-Identifier: GPL-2.0

//! Ethernet hardware addresses.

use kbridge_api::bindings::ETH_ALEN;

/// A 48-bit ethernet address.
pub type EtherAddr = [u8; ETH_ALEN];

pub const BROADCAST: EtherAddr = [0xff; ETH_ALEN];

/// Group bit set in the first octet. Broadcast is multicast too.
pub fn is_multicast_ether_addr(addr: &EtherAddr) -> bool {
    addr[0] & 0x01 != 0
}

pub fn is_zero_ether_addr(addr: &EtherAddr) -> bool {
    addr.iter().all(|&b| b == 0)
}

pub fn is_broadcast_ether_addr(addr: &EtherAddr) -> bool {
    *addr == BROADCAST
}

/// Unicast and not all zeroes.
pub fn is_valid_ether_addr(addr: &EtherAddr) -> bool {
    !is_multicast_ether_addr(addr) && !is_zero_ether_addr(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let unicast = [0x02, 0x00, 0x5e, 0x10, 0x20, 0x30];
        let multicast = [0x01, 0x00, 0x5e, 0x00, 0x00, 0xfb];

        assert!(is_valid_ether_addr(&unicast));
        assert!(!is_valid_ether_addr(&multicast));
        assert!(!is_valid_ether_addr(&[0; ETH_ALEN]));
        assert!(!is_valid_ether_addr(&BROADCAST));

        assert!(is_multicast_ether_addr(&BROADCAST));
        assert!(is_broadcast_ether_addr(&BROADCAST));
        assert!(!is_broadcast_ether_addr(&multicast));
        assert!(is_zero_ether_addr(&[0; ETH_ALEN]));
    }
}
