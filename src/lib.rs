//! snfkit - Sniffer (SNF) interface discovery and packet reflection.
//!
//! Enumerates Sniffer-capable interfaces and reflects selected frames from
//! an open capture device back into the kernel network stack.
//!
//! Native calls go through the [`driver::Driver`] trait. Enable the `snf`
//! feature to link `libsnf` and get [`driver::SnfDriver`] and
//! [`driver::Device`].

pub mod config;
pub mod directory;
pub mod domain;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod reflect;
pub mod reporter;

pub use directory::InterfaceDirectory;
pub use domain::{InterfaceRecord, LinkState, PortMask, Signal};
pub use driver::{CaptureHandle, Driver};
pub use error::{translate, Errno, SnfError};
pub use reflect::{CancelToken, ReflectChannel};

#[cfg(feature = "snf")]
pub use driver::{Device, SnfDriver};
