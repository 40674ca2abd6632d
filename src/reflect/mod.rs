//! Packet reflection back into the kernel network stack.
//!
//! Packets acquired through Sniffer can be reflected into the kernel path
//! as if the device had passed them through to the regular network stack.
//! This is a convenience for handing a few packets back to the kernel; it
//! is not a fast path.

mod cancel;
mod channel;

pub use cancel::CancelToken;
pub use channel::ReflectChannel;
