//! Bit masks of SNF port numbers.

use std::fmt;

/// Masks of Sniffer-capable ports. The least significant bit is port 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PortMask {
    /// Ports whose link state is UP
    pub link_up: u32,
    /// All Sniffer-capable ports
    pub valid: u32,
}

impl PortMask {
    /// Number of port numbers a mask can represent.
    pub const WIDTH: u32 = u32::BITS;

    /// Bit for `port`, or `None` if the port does not fit the mask.
    pub fn bit(port: u32) -> Option<u32> {
        1u32.checked_shl(port)
    }

    /// Record a port. Returns false if the port is outside the mask width.
    pub fn insert(&mut self, port: u32, link_up: bool) -> bool {
        let Some(bit) = Self::bit(port) else {
            return false;
        };
        self.valid |= bit;
        if link_up {
            self.link_up |= bit;
        }
        true
    }

    pub fn contains(&self, port: u32) -> bool {
        Self::bit(port).is_some_and(|bit| self.valid & bit != 0)
    }

    pub fn is_link_up(&self, port: u32) -> bool {
        Self::bit(port).is_some_and(|bit| self.link_up & bit != 0)
    }

    /// Valid port numbers in ascending order.
    pub fn ports(&self) -> impl Iterator<Item = u32> + '_ {
        (0..Self::WIDTH).filter(move |&port| self.contains(port))
    }
}

impl fmt::Display for PortMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "valid={:#b} link_up={:#b}", self.valid, self.link_up)
    }
}
