//! Scoped ownership of a native interface list.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::ptr;

use macaddr::MacAddr6;

use crate::domain::{InterfaceRecord, LinkState};
use crate::driver::Driver;
use crate::error::{translate, SnfError};
use crate::ffi::snf_ifaddrs;

/// A list returned by `getifaddrs`, released exactly once on drop.
pub(crate) struct IfAddrsList<'d, D: Driver> {
    driver: &'d D,
    head: *mut snf_ifaddrs,
}

impl<'d, D: Driver> IfAddrsList<'d, D> {
    /// Acquire the native list. Nothing is held if the call fails.
    pub(crate) fn acquire(driver: &'d D) -> Result<Self, SnfError> {
        let mut head = ptr::null_mut();
        translate(driver.getifaddrs(&mut head))?;
        Ok(Self { driver, head })
    }

    /// Borrow the nodes in list order. Borrows end before the list is released.
    pub(crate) fn iter(&self) -> Nodes<'_> {
        Nodes {
            cur: self.head,
            _list: PhantomData,
        }
    }

    /// Copy every node into an owned record, in one pass.
    pub(crate) fn to_records(&self) -> Vec<InterfaceRecord> {
        self.iter().map(copy_record).collect()
    }
}

impl<D: Driver> Drop for IfAddrsList<'_, D> {
    fn drop(&mut self) {
        // An empty list can come back as NULL; there is nothing to free then
        if !self.head.is_null() {
            unsafe { self.driver.freeifaddrs(self.head) };
        }
    }
}

pub(crate) struct Nodes<'a> {
    cur: *const snf_ifaddrs,
    _list: PhantomData<&'a snf_ifaddrs>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a snf_ifaddrs;

    fn next(&mut self) -> Option<Self::Item> {
        // Nodes stay valid until the owning list is dropped, which the
        // lifetime ties this borrow to.
        let node = unsafe { self.cur.as_ref()? };
        self.cur = node.snf_ifa_next;
        Some(node)
    }
}

/// Copy one native node into an owned record.
pub(crate) fn copy_record(node: &snf_ifaddrs) -> InterfaceRecord {
    let name = if node.snf_ifa_name.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(node.snf_ifa_name) }
            .to_string_lossy()
            .into_owned()
    };

    InterfaceRecord {
        name,
        port_number: node.snf_ifa_portnum,
        max_rings: node.snf_ifa_maxrings,
        max_inject: node.snf_ifa_maxinject,
        mac_address: MacAddr6::from(node.snf_ifa_macaddr),
        link_state: LinkState::from_native(node.snf_ifa_link_state),
        link_speed_bps: node.snf_ifa_link_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::{FakeDriver, FakeInterface};
    use crate::error::Errno;
    use crate::ffi;

    #[test]
    fn test_release_on_drop() {
        let driver = FakeDriver::new(vec![
            FakeInterface::new("snf0", 0, LinkState::Up),
            FakeInterface::new("snf1", 1, LinkState::Down),
        ]);

        {
            let list = IfAddrsList::acquire(&driver).unwrap();
            assert_eq!(list.iter().count(), 2);
            assert_eq!(driver.state().live_lists, 1);
        }

        let state = driver.state();
        assert_eq!(state.live_lists, 0);
        assert_eq!(state.freeifaddrs_calls, 1);
    }

    #[test]
    fn test_failed_acquire_holds_nothing() {
        let driver = FakeDriver::default();
        driver.state().getifaddrs_status = -libc::ENODEV;

        let err = IfAddrsList::acquire(&driver).err().unwrap();
        assert_eq!(err, SnfError::Native(Errno::ENODEV));

        let state = driver.state();
        assert_eq!(state.freeifaddrs_calls, 0);
        assert_eq!(state.live_lists, 0);
    }

    #[test]
    fn test_empty_list_is_not_freed() {
        let driver = FakeDriver::default();
        let list = IfAddrsList::acquire(&driver).unwrap();
        assert_eq!(list.to_records(), Vec::new());
        drop(list);

        let state = driver.state();
        assert_eq!(state.getifaddrs_calls, 1);
        assert_eq!(state.freeifaddrs_calls, 0);
    }

    #[test]
    fn test_copy_record_null_name() {
        let node = snf_ifaddrs {
            snf_ifa_next: ptr::null_mut(),
            snf_ifa_name: ptr::null(),
            snf_ifa_portnum: 4,
            snf_ifa_maxrings: 16,
            snf_ifa_macaddr: [1, 2, 3, 4, 5, 6],
            snf_ifa_maxinject: 2,
            snf_ifa_link_state: ffi::SNF_LINK_UP,
            snf_ifa_link_speed: 1_000_000_000,
        };

        let rec = copy_record(&node);
        assert_eq!(rec.name, "");
        assert_eq!(rec.port_number, 4);
        assert_eq!(rec.max_rings, 16);
        assert_eq!(rec.max_inject, 2);
        assert_eq!(rec.mac_address, MacAddr6::new(1, 2, 3, 4, 5, 6));
        assert_eq!(rec.link_state, LinkState::Up);
        assert_eq!(rec.link_speed_bps, 1_000_000_000);
    }
}
