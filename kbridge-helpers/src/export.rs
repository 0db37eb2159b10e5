// SPDX-License-Identifier: GPL-2.0

//! Emission of the `rust_helper_*` symbols.
//!
//! [`export_helpers!`](crate::export_helpers) holds the one list of helper
//! symbols: export class, C signature and the [`crate::helpers`] function
//! each forwards to. From that list it emits the unmangled `extern "C"`
//! functions, the [`EmittedSymbol`] records describing them and, with the
//! `kernel` feature, a GPL symbol table entry for every `Gpl` helper. The
//! crate expands it once with the Linux backend when built with `kernel`;
//! tests expand it with a stand-in runtime.

use crate::symbols::Export;

/// A helper as emitted: its symbol name and how it was exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmittedSymbol {
    pub name: &'static str,
    pub export: Export,
    /// Symbol table section of the export entry, for `Gpl` helpers.
    pub section: Option<&'static str>,
}

/// `struct kernel_symbol` in its absolute-address layout.
#[cfg(feature = "kernel")]
#[repr(C)]
pub struct KernelSymbol {
    pub value: *const crate::bindings::c_void,
    pub name: *const crate::bindings::c_char,
    pub namespace: *const crate::bindings::c_char,
}

// SAFETY: entries are immutable and point at code and string literals.
#[cfg(feature = "kernel")]
unsafe impl Sync for KernelSymbol {}

/// Emits the helper symbols, forwarding to the runtime expression `$rt`.
///
/// `$rt` must evaluate to a `&'static` reference to a type implementing
/// [`Runtime`](crate::Runtime). It is evaluated on every call. The expansion
/// also defines `RUST_HELPER_EXPORTS`, the emitted symbols in list order.
#[macro_export]
macro_rules! export_helpers {
    ($rt:expr) => {
        $crate::__emit_helpers! {
            $rt;
            None fn rust_helper_BUG() => bug;
            None fn rust_helper_copy_from_user(
                to: *mut $crate::bindings::c_void,
                from: *const $crate::bindings::c_void,
                n: $crate::bindings::c_ulong,
            ) -> $crate::bindings::c_ulong => copy_from_user;
            None fn rust_helper_copy_to_user(
                to: *mut $crate::bindings::c_void,
                from: *const $crate::bindings::c_void,
                n: $crate::bindings::c_ulong,
            ) -> $crate::bindings::c_ulong => copy_to_user;
            None fn rust_helper_clear_user(
                to: *mut $crate::bindings::c_void,
                n: $crate::bindings::c_ulong,
            ) -> $crate::bindings::c_ulong => clear_user;
            Gpl "___ksymtab_gpl+rust_helper_spin_lock_init" fn rust_helper_spin_lock_init(
                lock: *mut $crate::bindings::spinlock_t,
                name: *const $crate::bindings::c_char,
                key: *mut $crate::bindings::lock_class_key,
            ) => spin_lock_init;
            Gpl "___ksymtab_gpl+rust_helper_spin_lock" fn rust_helper_spin_lock(
                lock: *mut $crate::bindings::spinlock_t,
            ) => spin_lock;
            Gpl "___ksymtab_gpl+rust_helper_spin_unlock" fn rust_helper_spin_unlock(
                lock: *mut $crate::bindings::spinlock_t,
            ) => spin_unlock;
            Gpl "___ksymtab_gpl+rust_helper_init_wait" fn rust_helper_init_wait(
                wq_entry: *mut $crate::bindings::wait_queue_entry,
            ) => init_wait;
            Gpl "___ksymtab_gpl+rust_helper_current_pid" fn rust_helper_current_pid() -> $crate::bindings::c_int => current_pid;
            Gpl "___ksymtab_gpl+rust_helper_signal_pending" fn rust_helper_signal_pending() -> $crate::bindings::c_int => signal_pending;
            Gpl "___ksymtab_gpl+rust_helper_alloc_pages" fn rust_helper_alloc_pages(
                gfp_mask: $crate::bindings::gfp_t,
                order: $crate::bindings::c_uint,
            ) -> *mut $crate::bindings::page => alloc_pages;
            Gpl "___ksymtab_gpl+rust_helper_kmap" fn rust_helper_kmap(
                page: *mut $crate::bindings::page,
            ) -> *mut $crate::bindings::c_void => kmap;
            Gpl "___ksymtab_gpl+rust_helper_kunmap" fn rust_helper_kunmap(
                page: *mut $crate::bindings::page,
            ) => kunmap;
            Gpl "___ksymtab_gpl+rust_helper_cond_resched" fn rust_helper_cond_resched() -> $crate::bindings::c_int => cond_resched;
            Gpl "___ksymtab_gpl+rust_helper_copy_from_iter" fn rust_helper_copy_from_iter(
                addr: *mut $crate::bindings::c_void,
                bytes: $crate::bindings::size_t,
                i: *mut $crate::bindings::iov_iter,
            ) -> $crate::bindings::size_t => copy_from_iter;
            Gpl "___ksymtab_gpl+rust_helper_copy_to_iter" fn rust_helper_copy_to_iter(
                addr: *const $crate::bindings::c_void,
                bytes: $crate::bindings::size_t,
                i: *mut $crate::bindings::iov_iter,
            ) -> $crate::bindings::size_t => copy_to_iter;
            Gpl "___ksymtab_gpl+rust_helper_netdev_priv" fn rust_helper_netdev_priv(
                dev: *mut $crate::bindings::net_device,
            ) -> *mut $crate::bindings::c_void => netdev_priv;
            Gpl "___ksymtab_gpl+rust_helper_eth_hw_addr_random" fn rust_helper_eth_hw_addr_random(
                dev: *mut $crate::bindings::net_device,
            ) => eth_hw_addr_random;
            Gpl "___ksymtab_gpl+rust_helper_net_device_set_new_lstats" fn rust_helper_net_device_set_new_lstats(
                dev: *mut $crate::bindings::net_device,
            ) -> $crate::bindings::c_int => net_device_set_new_lstats;
            Gpl "___ksymtab_gpl+rust_helper_dev_lstats_add" fn rust_helper_dev_lstats_add(
                dev: *mut $crate::bindings::net_device,
                len: $crate::bindings::c_uint,
            ) => dev_lstats_add;
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_helpers {
    (
        $rt:expr;
        $(
            $export:ident $($section:literal)? fn $sym:ident($($arg:ident: $ty:ty),* $(,)?)
                $(-> $ret:ty)? => $helper:ident;
        )*
    ) => {
        $(
            #[allow(non_snake_case)]
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $sym($($arg: $ty),*) $(-> $ret)? {
                unsafe { $crate::helpers::$helper($rt, $($arg),*) }
            }

            $crate::__export_symbol!($export $($section)?, $sym);
        )*

        /// Helper symbols emitted by `export_helpers!`, in list order.
        pub static RUST_HELPER_EXPORTS: &[$crate::export::EmittedSymbol] = &[
            $(
                $crate::export::EmittedSymbol {
                    name: ::core::stringify!($sym),
                    export: $crate::symbols::Export::$export,
                    section: $crate::__export_section!($($section)?),
                },
            )*
        ];
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __export_section {
    () => {
        ::core::option::Option::None
    };
    ($section:literal) => {
        ::core::option::Option::Some($section)
    };
}

/// Places a GPL symbol table entry for `$sym` in `$section`.
#[cfg(feature = "kernel")]
#[doc(hidden)]
#[macro_export]
macro_rules! __export_symbol {
    (None, $sym:ident) => {};
    (Gpl $section:literal, $sym:ident) => {
        const _: () = {
            #[used]
            #[unsafe(link_section = $section)]
            static ENTRY: $crate::export::KernelSymbol = $crate::export::KernelSymbol {
                value: $sym as *const $crate::bindings::c_void,
                name: ::core::concat!(::core::stringify!($sym), "\0").as_ptr().cast(),
                namespace: ::core::ptr::null(),
            };
        };
    };
}

/// Without the runtime there is no symbol table to enter.
#[cfg(not(feature = "kernel"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __export_symbol {
    (None, $sym:ident) => {};
    (Gpl $section:literal, $sym:ident) => {};
}
