//! In-process driver double for tests.
//!
//! Builds real `snf_ifaddrs` lists on the heap, counts every native call
//! and records reflected frames.

use std::ffi::CString;
use std::os::raw::{c_int, c_void};
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard};

use macaddr::MacAddr6;

use super::{CaptureHandle, Driver};
use crate::domain::LinkState;
use crate::ffi::{self, snf_handle, snf_handle_t, snf_ifaddrs, snf_netdev_reflect_t};

/// Interface the double reports from `getifaddrs`.
#[derive(Debug, Clone)]
pub struct FakeInterface {
    pub name: &'static str,
    pub port: u32,
    pub mac: MacAddr6,
    pub link: LinkState,
}

impl FakeInterface {
    pub fn new(name: &'static str, port: u32, link: LinkState) -> Self {
        Self {
            name,
            port,
            mac: MacAddr6::new(0x00, 0x60, 0xdd, 0x00, 0x00, port as u8),
            link,
        }
    }

    pub fn with_mac(mut self, mac: MacAddr6) -> Self {
        self.mac = mac;
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub interfaces: Vec<FakeInterface>,
    pub getifaddrs_status: c_int,
    pub reflect_enable_status: c_int,
    pub reflect_status: c_int,
    pub getifaddrs_calls: usize,
    pub freeifaddrs_calls: usize,
    pub reflect_enable_calls: usize,
    pub reflect_calls: usize,
    /// Lists handed out and not yet released
    pub live_lists: usize,
    pub reflected: Vec<Vec<u8>>,
}

/// Cloneable handle onto shared fake state.
#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<FakeState>>,
}

/// Address the double hands out as the reflect reference.
const FAKE_REFLECT_DEV: usize = 0x5eed;

impl FakeDriver {
    pub fn new(interfaces: Vec<FakeInterface>) -> Self {
        let driver = Self::default();
        driver.state().interfaces = interfaces;
        driver
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn build_list(interfaces: &[FakeInterface]) -> *mut snf_ifaddrs {
        let mut head: *mut snf_ifaddrs = ptr::null_mut();
        for iface in interfaces.iter().rev() {
            let node = Box::new(snf_ifaddrs {
                snf_ifa_next: head,
                snf_ifa_name: CString::new(iface.name).unwrap().into_raw(),
                snf_ifa_portnum: iface.port,
                snf_ifa_maxrings: 32,
                snf_ifa_macaddr: iface.mac.into_array(),
                snf_ifa_maxinject: 8,
                snf_ifa_link_state: match iface.link {
                    LinkState::Up => ffi::SNF_LINK_UP,
                    LinkState::Down => ffi::SNF_LINK_DOWN,
                },
                snf_ifa_link_speed: 10_000_000_000,
            });
            head = Box::into_raw(node);
        }
        head
    }
}

impl Driver for FakeDriver {
    fn getifaddrs(&self, head: &mut *mut snf_ifaddrs) -> c_int {
        let mut state = self.state();
        state.getifaddrs_calls += 1;
        if state.getifaddrs_status != 0 {
            return state.getifaddrs_status;
        }
        *head = Self::build_list(&state.interfaces);
        if !head.is_null() {
            state.live_lists += 1;
        }
        0
    }

    unsafe fn freeifaddrs(&self, head: *mut snf_ifaddrs) {
        let mut state = self.state();
        state.freeifaddrs_calls += 1;
        state.live_lists -= 1;

        let mut cur = head;
        while !cur.is_null() {
            let node = Box::from_raw(cur);
            drop(CString::from_raw(node.snf_ifa_name as *mut _));
            cur = node.snf_ifa_next;
        }
    }

    unsafe fn reflect_enable(&self, handle: snf_handle_t, dev: &mut snf_netdev_reflect_t) -> c_int {
        let mut state = self.state();
        state.reflect_enable_calls += 1;
        assert!(!handle.is_null(), "reflect enabled on a null handle");
        if state.reflect_enable_status == 0 {
            *dev = FAKE_REFLECT_DEV as snf_netdev_reflect_t;
        }
        state.reflect_enable_status
    }

    unsafe fn reflect(&self, dev: snf_netdev_reflect_t, pkt: *const c_void, length: u32) -> c_int {
        let mut state = self.state();
        state.reflect_calls += 1;
        assert_eq!(dev as usize, FAKE_REFLECT_DEV, "reflect on an unknown device");
        let frame = std::slice::from_raw_parts(pkt as *const u8, length as usize);
        state.reflected.push(frame.to_vec());
        state.reflect_status
    }
}

/// A stand-in for an open device.
#[derive(Debug)]
pub struct FakeHandle {
    raw: Box<u8>,
}

impl FakeHandle {
    pub fn open() -> Self {
        Self { raw: Box::new(0) }
    }
}

unsafe impl CaptureHandle for FakeHandle {
    fn as_raw(&self) -> snf_handle_t {
        &*self.raw as *const u8 as *mut snf_handle
    }
}
