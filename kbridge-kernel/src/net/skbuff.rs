// SPDX-License-Identifier: GPL-2.0

//! Socket buffers.

use kbridge_api::bindings::sk_buff;
use kbridge_helpers::Runtime;

/// A packet handed to a driver's transmit hook.
///
/// The driver owns the buffer until it calls [`SkBuff::consume`] or passes
/// the raw pointer on.
pub struct SkBuff {
    skb: *mut sk_buff,
}

impl SkBuff {
    /// # Safety
    ///
    /// `skb` must be a live buffer owned by the caller.
    pub unsafe fn from_raw(skb: *mut sk_buff) -> Self {
        Self { skb }
    }

    pub fn as_raw(&self) -> *mut sk_buff {
        self.skb
    }

    /// Bytes of packet data.
    pub fn len<R: Runtime + ?Sized>(&self, rt: &R) -> u32 {
        // SAFETY: `skb` is live by the constructor's contract.
        unsafe { rt.skb_len(self.skb) }
    }

    pub fn is_empty<R: Runtime + ?Sized>(&self, rt: &R) -> bool {
        self.len(rt) == 0
    }

    /// Records a software transmit timestamp if one was requested.
    ///
    /// Call right before the packet is handed to hardware.
    pub fn tx_timestamp<R: Runtime + ?Sized>(&mut self, rt: &R) {
        // SAFETY: `skb` is live by the constructor's contract.
        unsafe { rt.skb_tx_timestamp(self.skb) }
    }

    /// Frees a successfully transmitted buffer.
    pub fn consume<R: Runtime + ?Sized>(self, rt: &R) {
        // SAFETY: owned by `self`, which is gone after this call.
        unsafe { rt.consume_skb(self.skb) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbridge_helpers::MockRuntime;
    use mockall::Sequence;

    const SKB: usize = 0xe000;

    #[test]
    fn test_len() {
        let mut rt = MockRuntime::new();
        rt.expect_skb_len()
            .withf(|skb| *skb as usize == SKB)
            .returning(|_| 1514);

        let skb = unsafe { SkBuff::from_raw(SKB as *mut sk_buff) };
        assert_eq!(skb.len(&rt), 1514);
        assert!(!skb.is_empty(&rt));
    }

    #[test]
    fn test_timestamp_then_consume() {
        let mut rt = MockRuntime::new();
        let mut seq = Sequence::new();
        rt.expect_skb_tx_timestamp()
            .withf(|skb| *skb as usize == SKB)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        rt.expect_consume_skb()
            .withf(|skb| *skb as usize == SKB)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut skb = unsafe { SkBuff::from_raw(SKB as *mut sk_buff) };
        skb.tx_timestamp(&rt);
        skb.consume(&rt);
    }
}
