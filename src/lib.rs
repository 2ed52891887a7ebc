//! Driver for the PL011 UART0 of BCM2835/BCM2837-class SoCs (Raspberry Pi
//! under QEMU and similar emulators).
//!
//! The driver is generic over a [`RegisterAccess`] implementation, so the
//! same code drives the live memory-mapped peripheral ([`PhysMmio`]) and a
//! simulated register bank in unit tests.
//!
//! # Example
//!
//! ```no_run
//! use bcm2835_uart::{Pl011, PhysMmio, TxPacing};
//!
//! // SAFETY: this is the only execution context and the peripheral window
//! // is identity-mapped.
//! let mmio = unsafe { PhysMmio::new() };
//! let mut uart = Pl011::new(mmio, TxPacing::default());
//! uart.init();
//! uart.send_str("hello\n");
//! ```

#![no_std]
#![deny(unused_must_use, missing_docs)]
#![allow(clippy::identity_op)]

#[cfg(test)]
extern crate std;

#[cfg(feature = "embedded-io")]
mod embedded_io;
pub mod gpio;
mod mmio;
pub mod registers;
mod uart;

pub use self::mmio::{PhysMmio, RegisterAccess};
pub use self::uart::{Pl011, TxPacing};

use thiserror::Error;

/// The type returned by driver methods.
pub type Result<T = ()> = core::result::Result<T, Error>;

/// The error type of the UART driver.
///
/// The peripheral reports nothing back to software (framing, overrun and
/// break conditions all stay masked), so the only failures are parameter
/// violations caught before any register is touched.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A GPIO pin number beyond the 54 pins of the BCM2835.
    #[error("Invalid GPIO pin {0} (BCM2835 has pins 0..=53)")]
    InvalidPin(u8),
}
