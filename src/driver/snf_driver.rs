//! `libsnf`-backed driver and device handle.

use std::os::raw::{c_int, c_void};
use std::ptr;

use super::{CaptureHandle, Driver};
use crate::error::{translate, SnfError};
use crate::ffi::{self, snf_handle_t, snf_ifaddrs, snf_netdev_reflect_t};

/// Driver that calls straight into `libsnf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnfDriver;

impl Driver for SnfDriver {
    fn getifaddrs(&self, head: &mut *mut snf_ifaddrs) -> c_int {
        unsafe { ffi::snf_getifaddrs(head) }
    }

    unsafe fn freeifaddrs(&self, head: *mut snf_ifaddrs) {
        ffi::snf_freeifaddrs(head)
    }

    unsafe fn reflect_enable(&self, handle: snf_handle_t, dev: &mut snf_netdev_reflect_t) -> c_int {
        ffi::snf_netdev_reflect_enable(handle, dev)
    }

    unsafe fn reflect(&self, dev: snf_netdev_reflect_t, pkt: *const c_void, length: u32) -> c_int {
        ffi::snf_netdev_reflect(dev, pkt, length)
    }
}

/// An open SNF device.
///
/// Opened with default RSS and data ring settings. Closed on drop, or
/// explicitly with `close` to observe the native status.
#[derive(Debug)]
pub struct Device {
    handle: snf_handle_t,
    port: u32,
}

// The handle is only used through `&self` by one reflect channel at a time
unsafe impl Send for Device {}

impl Device {
    /// Initialize the library and open `port` with `num_rings` receive rings.
    ///
    /// A `num_rings` of zero lets the library pick its default.
    pub fn open(port: u32, num_rings: i32) -> Result<Self, SnfError> {
        translate(unsafe { ffi::snf_init(ffi::SNF_VERSION_API) })?;

        let mut handle: snf_handle_t = ptr::null_mut();
        let num_rings = if num_rings > 0 { num_rings } else { -1 };
        translate(unsafe { ffi::snf_open(port, num_rings, ptr::null(), 0, -1, &mut handle) })?;

        tracing::debug!(port, num_rings, "opened SNF device");
        Ok(Self { handle, port })
    }

    pub fn port(&self) -> u32 {
        self.port
    }

    /// Close the device. Any reflect channel borrowing it must be gone.
    pub fn close(mut self) -> Result<(), SnfError> {
        let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
        translate(unsafe { ffi::snf_close(handle) })
    }
}

unsafe impl CaptureHandle for Device {
    fn as_raw(&self) -> snf_handle_t {
        self.handle
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        if let Err(e) = translate(unsafe { ffi::snf_close(self.handle) }) {
            tracing::warn!(port = self.port, "failed to close SNF device: {}", e);
        }
    }
}
