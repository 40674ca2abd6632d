//! Sniffer-capable interface records.

use std::fmt;
use std::os::raw::c_int;

use macaddr::MacAddr6;

use crate::ffi;

/// Link state of an interface's underlying port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    Down,
    Up,
}

impl LinkState {
    /// Map the native link state value. Anything but UP is down.
    pub fn from_native(state: c_int) -> Self {
        if state == ffi::SNF_LINK_UP {
            LinkState::Up
        } else {
            LinkState::Down
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Down => f.write_str("DOWN"),
            LinkState::Up => f.write_str("UP"),
        }
    }
}

/// One Sniffer-capable ethernet device, mapped to its SNF port number.
///
/// Records are snapshots: two enumerations may disagree if interfaces
/// change in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Interface name, as in ifconfig
    pub name: String,
    /// SNF port number
    pub port_number: u32,
    /// Maximum RX rings supported
    pub max_rings: i32,
    /// Maximum TX injection handles supported
    pub max_inject: i32,
    pub mac_address: MacAddr6,
    pub link_state: LinkState,
    /// Link speed in bits per second
    pub link_speed_bps: u64,
}

impl InterfaceRecord {
    pub fn is_link_up(&self) -> bool {
        self.link_state == LinkState::Up
    }
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: port {} {} {} {}",
            self.name,
            self.port_number,
            self.mac_address,
            self.link_state,
            format_speed(self.link_speed_bps)
        )
    }
}

/// Human-readable link speed, e.g. "10 Gbps".
pub(crate) fn format_speed(bps: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000_000_000, "Gbps"),
        (1_000_000, "Mbps"),
        (1_000, "Kbps"),
    ];

    for (scale, unit) in UNITS {
        if bps >= scale && bps % scale == 0 {
            return format!("{} {}", bps / scale, unit);
        }
    }
    format!("{} bps", bps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link_state: LinkState) -> InterfaceRecord {
        InterfaceRecord {
            name: "snf0".to_string(),
            port_number: 2,
            max_rings: 32,
            max_inject: 8,
            mac_address: MacAddr6::new(0x00, 0x60, 0xdd, 0x44, 0x55, 0x66),
            link_state,
            link_speed_bps: 10_000_000_000,
        }
    }

    #[test]
    fn test_link_state_from_native() {
        assert_eq!(LinkState::from_native(ffi::SNF_LINK_UP), LinkState::Up);
        assert_eq!(LinkState::from_native(ffi::SNF_LINK_DOWN), LinkState::Down);
        assert_eq!(LinkState::from_native(7), LinkState::Down);
    }

    #[test]
    fn test_is_link_up() {
        assert!(record(LinkState::Up).is_link_up());
        assert!(!record(LinkState::Down).is_link_up());
    }

    #[test]
    fn test_display() {
        let rec = record(LinkState::Up);
        let expected = format!("snf0: port 2 {} UP 10 Gbps", rec.mac_address);
        assert_eq!(rec.to_string(), expected);
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(1_000_000_000), "1 Gbps");
        assert_eq!(format_speed(25_000_000_000), "25 Gbps");
        assert_eq!(format_speed(100_000_000), "100 Mbps");
        assert_eq!(format_speed(2_500_000), "2500 Kbps");
        assert_eq!(format_speed(0), "0 bps");
        assert_eq!(format_speed(999), "999 bps");
    }
}
