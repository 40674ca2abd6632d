//! Native driver abstraction.
//!
//! This module defines the `Driver` trait, the single seam through which
//! every native SNF call is made. The `snf` feature provides `SnfDriver`,
//! which forwards to `libsnf`; tests use an in-process double.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "snf")]
mod snf_driver;

#[cfg(feature = "snf")]
pub use snf_driver::{Device, SnfDriver};

use std::os::raw::{c_int, c_void};

use crate::ffi::{snf_handle_t, snf_ifaddrs, snf_netdev_reflect_t};

/// The native calls used by the directory and reflection paths.
///
/// Methods return the raw native status; callers translate it with
/// `crate::error::translate` immediately.
pub trait Driver {
    /// Allocate the list of Sniffer-capable interfaces into `head`.
    fn getifaddrs(&self, head: &mut *mut snf_ifaddrs) -> c_int;

    /// Release a list obtained from `getifaddrs`.
    ///
    /// # Safety
    ///
    /// `head` must come from a successful `getifaddrs` on this driver and
    /// must not be used or released again afterwards.
    unsafe fn freeifaddrs(&self, head: *mut snf_ifaddrs);

    /// Enable reflection on an open device, storing the reflect reference.
    ///
    /// # Safety
    ///
    /// `handle` must be an open device handle.
    unsafe fn reflect_enable(&self, handle: snf_handle_t, dev: &mut snf_netdev_reflect_t) -> c_int;

    /// Reflect `length` bytes at `pkt` into the kernel stack.
    ///
    /// # Safety
    ///
    /// `dev` must come from `reflect_enable` on a handle that is still open,
    /// and `pkt` must be readable for `length` bytes.
    unsafe fn reflect(&self, dev: snf_netdev_reflect_t, pkt: *const c_void, length: u32) -> c_int;
}

impl<D: Driver + ?Sized> Driver for &D {
    fn getifaddrs(&self, head: &mut *mut snf_ifaddrs) -> c_int {
        (**self).getifaddrs(head)
    }

    unsafe fn freeifaddrs(&self, head: *mut snf_ifaddrs) {
        (**self).freeifaddrs(head)
    }

    unsafe fn reflect_enable(&self, handle: snf_handle_t, dev: &mut snf_netdev_reflect_t) -> c_int {
        (**self).reflect_enable(handle, dev)
    }

    unsafe fn reflect(&self, dev: snf_netdev_reflect_t, pkt: *const c_void, length: u32) -> c_int {
        (**self).reflect(dev, pkt, length)
    }
}

/// An open capture device that reflection can be enabled on.
///
/// # Safety
///
/// Implementors guarantee that `as_raw` returns a handle that stays open
/// for as long as `self` is borrowed. Closing must require ownership.
pub unsafe trait CaptureHandle {
    fn as_raw(&self) -> snf_handle_t;
}
