//! Domain models for Sniffer interfaces and reflection.
//!
//! These types are owned copies with no ties to native memory.

mod interface;
mod port_mask;
mod signal;

pub use interface::{InterfaceRecord, LinkState};
pub use port_mask::PortMask;
pub use signal::Signal;
