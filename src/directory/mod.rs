//! Discovery of Sniffer-capable interfaces.
//!
//! Every query performs a fresh enumeration. Native list memory is copied
//! into owned `InterfaceRecord`s and released before the query returns.

mod ifaddrs;

use macaddr::MacAddr6;

use crate::domain::{InterfaceRecord, PortMask};
use crate::driver::Driver;
use crate::error::SnfError;

use ifaddrs::IfAddrsList;

/// Enumerates and looks up Sniffer-capable interfaces.
#[derive(Debug, Clone, Default)]
pub struct InterfaceDirectory<D> {
    driver: D,
}

impl<D: Driver> InterfaceDirectory<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// List all Sniffer-capable ethernet devices.
    pub fn list_interfaces(&self) -> Result<Vec<InterfaceRecord>, SnfError> {
        let list = IfAddrsList::acquire(&self.driver)?;
        let records = list.to_records();
        drop(list);

        tracing::debug!(count = records.len(), "enumerated SNF interfaces");
        Ok(records)
    }

    /// Find the first device whose MAC address matches `addr`.
    pub fn find_by_hardware_address(
        &self,
        addr: MacAddr6,
    ) -> Result<Option<InterfaceRecord>, SnfError> {
        Ok(self
            .list_interfaces()?
            .into_iter()
            .find(|ifa| ifa.mac_address == addr))
    }

    /// Find the first device named `name`, as in ifconfig.
    pub fn find_by_name(&self, name: &str) -> Result<Option<InterfaceRecord>, SnfError> {
        Ok(self
            .list_interfaces()?
            .into_iter()
            .find(|ifa| ifa.name == name))
    }

    /// Masks of all Sniffer-capable ports and of those with link UP.
    ///
    /// Ports that do not fit the mask width are left out of both masks.
    pub fn compute_port_mask(&self) -> Result<PortMask, SnfError> {
        let mut mask = PortMask::default();
        for ifa in self.list_interfaces()? {
            if !mask.insert(ifa.port_number, ifa.is_link_up()) {
                tracing::warn!(
                    interface = %ifa.name,
                    port = ifa.port_number,
                    "port number does not fit a {}-bit port mask, skipping",
                    PortMask::WIDTH
                );
            }
        }
        Ok(mask)
    }
}
