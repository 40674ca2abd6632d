//! Reflect channel bound to an open capture device.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use crate::domain::Signal;
use crate::driver::{CaptureHandle, Driver};
use crate::error::{translate, SnfError};
use crate::ffi::snf_netdev_reflect_t;

use super::CancelToken;

/// Reflects raw frames into the kernel network stack.
///
/// The channel borrows its parent handle for `'h`, so the handle cannot be
/// closed while the channel exists. Once the attached `CancelToken` trips,
/// every `send` fails with `SnfError::Cancelled` without touching the device.
///
/// A channel may be moved to another thread but not shared; `send` takes
/// `&mut self`.
pub struct ReflectChannel<'h, D: Driver> {
    driver: D,
    dev: snf_netdev_reflect_t,
    cancel: Option<CancelToken>,
    cancel_logged: bool,
    _handle: PhantomData<&'h ()>,
}

impl<D: Driver> fmt::Debug for ReflectChannel<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectChannel")
            .field("dev", &self.dev)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

// The reflect reference is owned by this channel alone
unsafe impl<D: Driver + Send> Send for ReflectChannel<'_, D> {}

impl<'h, D: Driver> ReflectChannel<'h, D> {
    /// Enable reflection on `handle`.
    ///
    /// The native enable call is documented to always succeed; its status
    /// is still checked.
    pub fn enable<H: CaptureHandle>(driver: D, handle: &'h H) -> Result<Self, SnfError> {
        let mut dev: snf_netdev_reflect_t = ptr::null_mut();
        translate(unsafe { driver.reflect_enable(handle.as_raw(), &mut dev) })?;

        tracing::debug!("enabled packet reflection");
        Ok(Self {
            driver,
            dev,
            cancel: None,
            cancel_logged: false,
            _handle: PhantomData,
        })
    }

    /// Enable reflection with a cancellation latch attached from the start.
    pub fn enable_with_cancel<H: CaptureHandle>(
        driver: D,
        handle: &'h H,
        cancel: CancelToken,
    ) -> Result<Self, SnfError> {
        let mut channel = Self::enable(driver, handle)?;
        channel.attach_cancellation(cancel);
        Ok(channel)
    }

    /// Attach a cancellation latch, replacing any previous one.
    pub fn attach_cancellation(&mut self, cancel: CancelToken) {
        if self.cancel.is_some() {
            tracing::debug!("replacing reflect cancellation token");
        }
        self.cancel = Some(cancel);
        self.cancel_logged = false;
    }

    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Whether the attached latch has tripped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled_by().is_some()
    }

    fn cancelled_by(&self) -> Option<Signal> {
        self.cancel.as_ref().and_then(CancelToken::tripped)
    }

    /// Reflect one frame to the network device.
    ///
    /// `frame` should hold a complete Ethernet frame without the trailing
    /// CRC, starting with a valid Ethernet header. Contents are not checked
    /// here; the device rejects frames it cannot use.
    ///
    /// Success means the request was accepted, not that the kernel did
    /// anything with the frame.
    pub fn send(&mut self, frame: &[u8]) -> Result<(), SnfError> {
        if let Some(signal) = self.cancelled_by() {
            if !self.cancel_logged {
                tracing::info!(%signal, "reflect channel cancelled");
                self.cancel_logged = true;
            }
            return Err(SnfError::Cancelled(signal));
        }

        if frame.is_empty() {
            return Err(SnfError::EmptyFrame);
        }

        let length =
            u32::try_from(frame.len()).map_err(|_| SnfError::FrameTooLarge(frame.len()))?;

        tracing::trace!(length, "reflecting frame");
        translate(unsafe { self.driver.reflect(self.dev, frame.as_ptr().cast(), length) })
    }
}
