//! Console reporter.

use std::io::{self, Write};

use crate::domain::{InterfaceRecord, PortMask};
use crate::error::SnfError;
use crate::reporter::Reporter;

/// Prints results to stdout in a human-readable form.
pub struct ConsoleReporter {
    /// Whether to show ring and injection capacities
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Enable or disable verbose output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn format_interface(&self, ifa: &InterfaceRecord) -> String {
        let mut output = ifa.to_string();
        if self.verbose {
            output.push_str(&format!(
                " | rings: {} | inject: {}",
                ifa.max_rings, ifa.max_inject
            ));
        }
        output
    }

    fn format_port_mask(&self, mask: &PortMask) -> String {
        let ports: Vec<String> = mask
            .ports()
            .map(|port| {
                let state = if mask.is_link_up(port) { "UP" } else { "DOWN" };
                format!("{}:{}", port, state)
            })
            .collect();

        format!(
            "valid:   {:#010x}\nlink up: {:#010x}\nports:   {}",
            mask.valid,
            mask.link_up,
            if ports.is_empty() {
                "none".to_string()
            } else {
                ports.join(" ")
            }
        )
    }

    fn print(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report_interfaces(&self, interfaces: &[InterfaceRecord]) {
        if interfaces.is_empty() {
            self.print("No Sniffer-capable interfaces found.");
            return;
        }
        for ifa in interfaces {
            self.print(&self.format_interface(ifa));
        }
    }

    fn report_match(&self, query: &str, found: Option<&InterfaceRecord>) {
        match found {
            Some(ifa) => self.print(&self.format_interface(ifa)),
            None => self.print(&format!("No Sniffer-capable interface matches {}", query)),
        }
    }

    fn report_port_mask(&self, mask: &PortMask) {
        self.print(&self.format_port_mask(mask));
    }

    fn on_reflect_start(&self, interface: &str, count: u64) {
        println!("Reflecting {} frames through {}", count, interface);
        println!("Press Ctrl+C to stop.\n");
    }

    fn on_reflect_stop(&self, sent: u64, stopped_by: Option<&SnfError>) {
        match stopped_by {
            Some(SnfError::Cancelled(signal)) => {
                println!("\nStopped by {} after {} frames.", signal, sent)
            }
            Some(e) => println!("\nStopped after {} frames: {}", sent, e),
            None => println!("Reflected {} frames.", sent),
        }
    }
}
