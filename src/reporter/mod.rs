//! Reporting of interfaces, port masks and reflection progress.
//!
//! This module defines the `Reporter` trait used by `snfctl` and a console
//! implementation.

mod console_reporter;

pub use console_reporter::ConsoleReporter;

use crate::domain::{InterfaceRecord, PortMask};
use crate::error::SnfError;

/// Output sink for `snfctl` results.
pub trait Reporter {
    /// Report an interface listing.
    fn report_interfaces(&self, interfaces: &[InterfaceRecord]);

    /// Report the result of a lookup for `query`.
    fn report_match(&self, query: &str, found: Option<&InterfaceRecord>);

    /// Report valid and link-up port masks.
    fn report_port_mask(&self, mask: &PortMask);

    /// Called when reflection starts on `interface`.
    fn on_reflect_start(&self, interface: &str, count: u64);

    /// Called when reflection stops, with the error that stopped it, if any.
    fn on_reflect_stop(&self, sent: u64, stopped_by: Option<&SnfError>);
}
