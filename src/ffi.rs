//! Raw declarations for the Sniffer (`libsnf`) C API.
//!
//! Layouts are always available so the enumeration walk can be exercised
//! without the library. The `extern` block is only compiled with the `snf`
//! feature, which links `libsnf`. Higher-level code goes through
//! `crate::driver::Driver` rather than calling these directly.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_int};

/// `enum snf_link_state`
pub const SNF_LINK_DOWN: c_int = 0;
pub const SNF_LINK_UP: c_int = 1;

/// Opaque marker for `struct snf_handle`.
#[repr(C)]
pub struct snf_handle {
    _private: [u8; 0],
}

/// Opaque marker for `struct snf_netdev_reflect`.
#[repr(C)]
pub struct snf_netdev_reflect {
    _private: [u8; 0],
}

pub type snf_handle_t = *mut snf_handle;
pub type snf_netdev_reflect_t = *mut snf_netdev_reflect;

/// Node of the list returned by `snf_getifaddrs`.
#[repr(C)]
#[derive(Debug)]
pub struct snf_ifaddrs {
    pub snf_ifa_next: *mut snf_ifaddrs,
    pub snf_ifa_name: *const c_char,
    pub snf_ifa_portnum: u32,
    pub snf_ifa_maxrings: c_int,
    pub snf_ifa_macaddr: [u8; 6],
    pub snf_ifa_maxinject: c_int,
    pub snf_ifa_link_state: c_int,
    pub snf_ifa_link_speed: u64,
}

#[cfg(feature = "snf")]
pub use linked::*;

#[cfg(feature = "snf")]
mod linked {
    use super::*;
    use std::os::raw::c_void;

    /// API version this crate was written against.
    pub const SNF_VERSION_API: u16 = 8;

    /// Opaque RSS parameters; only ever passed as NULL.
    #[repr(C)]
    pub struct snf_rss_params {
        _private: [u8; 0],
    }

    #[link(name = "snf")]
    unsafe extern "C" {
        pub fn snf_init(api_version: u16) -> c_int;

        pub fn snf_open(
            portnum: u32,
            num_rings: c_int,
            rss_params: *const snf_rss_params,
            dataring_sz: i64,
            flags: c_int,
            devhandle: *mut snf_handle_t,
        ) -> c_int;

        pub fn snf_close(devhandle: snf_handle_t) -> c_int;

        pub fn snf_getifaddrs(ifaddrs_o: *mut *mut snf_ifaddrs) -> c_int;

        pub fn snf_freeifaddrs(ifaddrs: *mut snf_ifaddrs);

        pub fn snf_netdev_reflect_enable(
            hsnf: snf_handle_t,
            handle: *mut snf_netdev_reflect_t,
        ) -> c_int;

        pub fn snf_netdev_reflect(
            ref_dev: snf_netdev_reflect_t,
            pkt: *const c_void,
            length: u32,
        ) -> c_int;
    }
}
