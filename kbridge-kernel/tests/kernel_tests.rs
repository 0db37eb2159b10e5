//! kbridge-kernel integration tests
//!
//! Drives the safe layer the way a software network driver does over its
//! lifetime, against a mocked runtime.

use kbridge_api::bindings::{
    c_void, net_device, page, rtnl_link_ops, rtnl_link_stats64, sk_buff, PAGE_SIZE,
};
use kbridge_helpers::MockRuntime;
use kbridge_kernel::net::{NetDevice, RtnlLinkOps, RtnlLinkStats64, RtnlLock, SkBuff};
use kbridge_kernel::pages::Pages;
use kbridge_kernel::task::Task;
use kbridge_kernel::user_ptr::UserSlicePtr;
use kbridge_kernel::{Error, GfpFlags};
use mockall::Sequence;

const DEV: usize = 0x10_000;
const OPS: usize = 0x40_000;

#[test]
fn test_driver_lifecycle() {
    let mut rt = MockRuntime::new();
    let mut seq = Sequence::new();

    rt.expect_rtnl_link_register()
        .withf(|ops| *ops as usize == OPS)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(0);
    rt.expect_rtnl_lock().times(1).in_sequence(&mut seq).return_const(());
    rt.expect_eth_hw_addr_random()
        .withf(|dev| *dev as usize == DEV)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    rt.expect_netdev_alloc_pcpu_stats()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| 0x20_000 as *mut _);
    rt.expect_netdev_set_lstats()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    rt.expect_rtnl_unlock().times(1).in_sequence(&mut seq).return_const(());
    for (skb, len) in [(0x50_000usize, 1514u32), (0x51_000, 50)] {
        rt.expect_skb_len()
            .withf(move |p| *p as usize == skb)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(len);
        rt.expect_dev_lstats_add()
            .withf(move |dev, l| *dev as usize == DEV && *l == len)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        rt.expect_skb_tx_timestamp()
            .withf(move |p| *p as usize == skb)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        rt.expect_consume_skb()
            .withf(move |p| *p as usize == skb)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }
    rt.expect_dev_lstats_read()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, packets, bytes| unsafe {
            *packets = 2;
            *bytes = 1564;
        });
    rt.expect_netdev_lstats()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| 0x20_000 as *mut _);
    rt.expect_free_percpu()
        .withf(|ptr| *ptr as usize == 0x20_000)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    rt.expect_rtnl_link_unregister()
        .withf(|ops| *ops as usize == OPS)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let ops = unsafe { RtnlLinkOps::from_raw(OPS as *mut rtnl_link_ops) };
    ops.register(&rt).unwrap();

    let dev = unsafe { NetDevice::from_raw(DEV as *mut net_device) };
    {
        let _rtnl = RtnlLock::lock(&rt);
        dev.hw_addr_random(&rt);
        dev.set_new_pcpu_lstats(&rt).unwrap();
    }

    for raw in [0x50_000usize, 0x51_000] {
        let mut skb = unsafe { SkBuff::from_raw(raw as *mut sk_buff) };
        unsafe { dev.lstats_add(&rt, skb.len(&rt)) };
        skb.tx_timestamp(&rt);
        skb.consume(&rt);
    }

    let mut raw = rtnl_link_stats64::default();
    let mut stats = unsafe { RtnlLinkStats64::from_raw(&mut raw) };
    unsafe { stats.dev_read(&rt, &dev) };
    assert_eq!((stats.tx_packets(), stats.tx_bytes()), (2, 1564));

    unsafe { dev.free_lstats(&rt) };
    ops.unregister(&rt);
}

#[test]
fn test_link_registration_failure_propagates() {
    let mut rt = MockRuntime::new();
    rt.expect_rtnl_link_register().times(1).return_const(-12);

    let ops = unsafe { RtnlLinkOps::from_raw(OPS as *mut rtnl_link_ops) };
    let err = ops.register(&rt).unwrap_err();
    assert_eq!(err, Error::OutOfMemory);
}

#[test]
fn test_init_failure_propagates() {
    let mut rt = MockRuntime::new();
    rt.expect_netdev_alloc_pcpu_stats().returning(|| core::ptr::null_mut());
    rt.expect_netdev_set_lstats().return_const(());

    let dev = unsafe { NetDevice::from_raw(DEV as *mut net_device) };
    let err = dev.set_new_pcpu_lstats(&rt).unwrap_err();
    assert_eq!(err, Error::OutOfMemory);
    assert_eq!(err.to_errno(), -12);
}

#[test]
fn test_user_buffer_into_page() {
    let backing = Box::leak(vec![0u8; PAGE_SIZE].into_boxed_slice());
    let vaddr = backing.as_mut_ptr() as usize;

    let mut rt = MockRuntime::new();
    rt.expect_signal_pending().return_const(0);
    rt.expect_copy_from_user().times(1).returning(|to, _, n| {
        unsafe { core::ptr::write_bytes(to.cast::<u8>(), b'x', n as usize) };
        0
    });
    rt.expect_alloc_pages().times(1).returning(|_, _| 0x30_000 as *mut page);
    rt.expect_kmap().returning(move |_| vaddr as *mut c_void);
    rt.expect_kunmap().return_const(());
    rt.expect_free_pages()
        .withf(|page, order| *page as usize == 0x30_000 && *order == 0)
        .times(1)
        .return_const(());

    Task::check_signal(&rt).unwrap();

    let mut buf = [0u8; 32];
    let mut reader = unsafe { UserSlicePtr::new(0x7fff_0000 as *mut c_void, buf.len()) }.reader();
    reader.read_slice(&rt, &mut buf).unwrap();
    assert!(reader.is_empty());

    let pages = Pages::<_, 0>::new(&rt, GfpFlags::KERNEL).unwrap();
    pages.write(&buf, 0).unwrap();
    assert_eq!(&backing[..32], &[b'x'; 32]);
}
