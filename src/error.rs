//! Error types and native status translation.

use std::fmt;
use std::io;
use std::os::raw::c_int;

use thiserror::Error;

use crate::domain::Signal;

/// POSIX error number reported by a failed native call.
///
/// Holds the magnitude of the native status code. The sign carries no
/// meaning on the native side, so it is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Errno(u32);

impl Errno {
    pub const EINVAL: Errno = Errno(libc::EINVAL as u32);
    pub const ENODEV: Errno = Errno(libc::ENODEV as u32);
    pub const ENOMEM: Errno = Errno(libc::ENOMEM as u32);
    pub const EBUSY: Errno = Errno(libc::EBUSY as u32);

    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw error number.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Convert into an `io::Error` so callers can inspect `ErrorKind`.
    pub fn to_io_error(&self) -> io::Error {
        match i32::try_from(self.0) {
            Ok(code) => io::Error::from_raw_os_error(code),
            Err(_) => io::Error::other(format!("unknown error {}", self.0)),
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (errno {})", self.to_io_error(), self.0)
    }
}

impl From<Errno> for io::Error {
    fn from(errno: Errno) -> Self {
        errno.to_io_error()
    }
}

/// Errors surfaced by the directory and reflection APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnfError {
    #[error("SNF call failed: {0}")]
    Native(Errno),

    #[error("cannot reflect an empty frame")]
    EmptyFrame,

    #[error("frame of {0} bytes is too large to reflect")]
    FrameTooLarge(usize),

    #[error("reflection cancelled: caught {0}")]
    Cancelled(Signal),
}

impl SnfError {
    /// The native error number, if this is a native failure.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            SnfError::Native(errno) => Some(*errno),
            _ => None,
        }
    }
}

/// Translate a native status code.
///
/// Zero is success. Any other value, either sign, is a failure carrying its
/// magnitude as the error number. Every native call is checked through here
/// exactly once, right after it returns.
pub fn translate(code: c_int) -> Result<(), SnfError> {
    if code == 0 {
        Ok(())
    } else {
        Err(SnfError::Native(Errno(code.unsigned_abs())))
    }
}
