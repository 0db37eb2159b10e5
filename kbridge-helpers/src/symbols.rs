// SPDX-License-Identifier: GPL-2.0

//! Exported symbol table
//!
//! The `rust_helper_*` symbols form a fixed ABI: names, C prototypes and
//! export class must not drift. This table is the single description of that
//! ABI and is what the tests check the emitted symbols against.

/// How a helper is made visible to loadable modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    /// Linked into the core image only.
    None,
    /// Exported to GPL-compatible modules.
    Gpl,
}

/// One exported helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperSymbol {
    /// Symbol name
    pub name: &'static str,
    /// C prototype
    pub prototype: &'static str,
    /// Export class
    pub export: Export,
}

const fn helper(name: &'static str, prototype: &'static str, export: Export) -> HelperSymbol {
    HelperSymbol { name, prototype, export }
}

/// Every helper symbol, in definition order.
pub const HELPERS: [HelperSymbol; 20] = [
    helper("rust_helper_BUG", "void rust_helper_BUG(void)", Export::None),
    helper(
        "rust_helper_copy_from_user",
        "unsigned long rust_helper_copy_from_user(void *to, const void __user *from, unsigned long n)",
        Export::None,
    ),
    helper(
        "rust_helper_copy_to_user",
        "unsigned long rust_helper_copy_to_user(void __user *to, const void *from, unsigned long n)",
        Export::None,
    ),
    helper(
        "rust_helper_clear_user",
        "unsigned long rust_helper_clear_user(void __user *to, unsigned long n)",
        Export::None,
    ),
    helper(
        "rust_helper_spin_lock_init",
        "void rust_helper_spin_lock_init(spinlock_t *lock, const char *name, struct lock_class_key *key)",
        Export::Gpl,
    ),
    helper("rust_helper_spin_lock", "void rust_helper_spin_lock(spinlock_t *lock)", Export::Gpl),
    helper("rust_helper_spin_unlock", "void rust_helper_spin_unlock(spinlock_t *lock)", Export::Gpl),
    helper(
        "rust_helper_init_wait",
        "void rust_helper_init_wait(struct wait_queue_entry *wq_entry)",
        Export::Gpl,
    ),
    helper("rust_helper_current_pid", "int rust_helper_current_pid(void)", Export::Gpl),
    helper("rust_helper_signal_pending", "int rust_helper_signal_pending(void)", Export::Gpl),
    helper(
        "rust_helper_alloc_pages",
        "struct page *rust_helper_alloc_pages(gfp_t gfp_mask, unsigned int order)",
        Export::Gpl,
    ),
    helper("rust_helper_kmap", "void *rust_helper_kmap(struct page *page)", Export::Gpl),
    helper("rust_helper_kunmap", "void rust_helper_kunmap(struct page *page)", Export::Gpl),
    helper("rust_helper_cond_resched", "int rust_helper_cond_resched(void)", Export::Gpl),
    helper(
        "rust_helper_copy_from_iter",
        "size_t rust_helper_copy_from_iter(void *addr, size_t bytes, struct iov_iter *i)",
        Export::Gpl,
    ),
    helper(
        "rust_helper_copy_to_iter",
        "size_t rust_helper_copy_to_iter(const void *addr, size_t bytes, struct iov_iter *i)",
        Export::Gpl,
    ),
    helper(
        "rust_helper_netdev_priv",
        "void *rust_helper_netdev_priv(struct net_device *dev)",
        Export::Gpl,
    ),
    helper(
        "rust_helper_eth_hw_addr_random",
        "void rust_helper_eth_hw_addr_random(struct net_device *dev)",
        Export::Gpl,
    ),
    helper(
        "rust_helper_net_device_set_new_lstats",
        "int rust_helper_net_device_set_new_lstats(struct net_device *dev)",
        Export::Gpl,
    ),
    helper(
        "rust_helper_dev_lstats_add",
        "void rust_helper_dev_lstats_add(struct net_device *dev, unsigned int len)",
        Export::Gpl,
    ),
];

/// Looks up a helper by symbol name.
pub fn lookup(name: &str) -> Option<&'static HelperSymbol> {
    HELPERS.iter().find(|sym| sym.name == name)
}

/// Helpers visible to loadable modules.
pub fn exported() -> impl Iterator<Item = &'static HelperSymbol> {
    HELPERS.iter().filter(|sym| sym.export == Export::Gpl)
}
