//! Signals observed by a cancellation latch.

use std::fmt;

/// A process signal number, as reported to a cancellation latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal(i32);

impl Signal {
    pub const HANGUP: Signal = Signal(libc::SIGHUP);
    pub const INTERRUPT: Signal = Signal(libc::SIGINT);
    pub const QUIT: Signal = Signal(libc::SIGQUIT);
    pub const TERMINATE: Signal = Signal(libc::SIGTERM);
    /// One of SIGINT, SIGTERM or SIGHUP, when the handler cannot tell which.
    pub const SHUTDOWN: Signal = Signal(0);

    pub fn new(number: i32) -> Self {
        Self(number)
    }

    /// The raw signal number.
    pub fn number(&self) -> i32 {
        self.0
    }

    fn name(&self) -> Option<&'static str> {
        match self.0 {
            libc::SIGHUP => Some("SIGHUP"),
            libc::SIGINT => Some("SIGINT"),
            libc::SIGQUIT => Some("SIGQUIT"),
            libc::SIGTERM => Some("SIGTERM"),
            0 => Some("termination signal"),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "signal {}", self.0),
        }
    }
}
