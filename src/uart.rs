//! The PL011 UART0 driver.

use crate::gpio::{self, Function};
use crate::mmio::RegisterAccess;
use crate::registers::{
    Control, Flag, Interrupt, LineControl, BAUD_DIVISOR, UART0_CR, UART0_DR, UART0_FBRD, UART0_FR,
    UART0_IBRD, UART0_ICR, UART0_IMSC, UART0_LCRH, UART0_RX_PIN, UART0_TX_PIN,
};
use core::ffi::CStr;
use core::fmt::{self, Write};
use log::debug;

/// Transmit pacing policy.
///
/// The PL011 defines a handshake: poll the flag register's TXFF bit and only
/// write the data register once the transmit FIFO has room. Some emulated
/// targets have been seen dropping output under that handshake while a plain
/// fixed inter-character delay got every byte through, so the delay scheme
/// is kept available as an explicit fallback rather than removed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TxPacing {
    /// Poll TXFF before each data register write. The default.
    FlagPoll,
    /// Never read the flag register; pace output with fixed busy-wait
    /// delays and trust them to outlast the shift register.
    FixedDelay {
        /// Spin count after every byte.
        per_byte: u32,
        /// Additional spin count between the bytes of a string send.
        inter_char: u32,
    },
}

impl TxPacing {
    /// The delay fallback with spin counts known to produce clean output on
    /// QEMU's `raspi2b` machine.
    pub const fn fixed_delay() -> Self {
        TxPacing::FixedDelay {
            per_byte: 100_000,
            inter_char: 50_000,
        }
    }
}

impl Default for TxPacing {
    fn default() -> Self {
        TxPacing::FlagPoll
    }
}

/// Driver for the PL011 UART0.
///
/// Generic over [`RegisterAccess`] so tests can drive it against a simulated
/// register bank. All operations block by spinning; there are no timeouts
/// and no interrupts (every source is masked during [`init`]).
///
/// [`init`]: Pl011::init
#[derive(Debug)]
pub struct Pl011<M: RegisterAccess> {
    mmio: M,
    pacing: TxPacing,
}

impl<M: RegisterAccess> Pl011<M> {
    /// Creates a driver over the given register access handle.
    ///
    /// No hardware is touched until [`init`](Pl011::init).
    pub const fn new(mmio: M, pacing: TxPacing) -> Self {
        Self { mmio, pacing }
    }

    /// Brings the UART up: 115200 baud, 8 data bits, no parity, one stop
    /// bit, FIFOs on, all interrupt sources masked, transmit and receive
    /// enabled.
    ///
    /// The sequence is order-dependent; every step is unconditional. If the
    /// peripheral is absent (wrong platform, wrong machine type) the writes
    /// land on unbacked addresses and behaviour is undefined.
    pub fn init(&mut self) {
        // The UART must be disabled while the baud and line registers are
        // reprogrammed.
        self.mmio.write_word(UART0_CR, 0);

        // Route the TX/RX pins to the UART and drop their pull resistors.
        // Pins 14 and 15 are always in range, so neither call can fail.
        let _ = gpio::set_function(&mut self.mmio, UART0_TX_PIN, Function::Alt0);
        let _ = gpio::set_function(&mut self.mmio, UART0_RX_PIN, Function::Alt0);
        let _ = gpio::disable_pull(&mut self.mmio, &[UART0_TX_PIN, UART0_RX_PIN]);

        self.mmio.write_word(UART0_ICR, Interrupt::all().bits());

        let (integer, fractional) = BAUD_DIVISOR;
        self.mmio.write_word(UART0_IBRD, integer);
        self.mmio.write_word(UART0_FBRD, fractional);

        self.mmio
            .write_word(UART0_LCRH, (LineControl::FEN | LineControl::WLEN8).bits());

        // Masking only suppresses interrupt generation; the flag register
        // keeps working for polled use.
        self.mmio
            .write_word(UART0_IMSC, Interrupt::MASKED_SOURCES.bits());

        self.mmio.write_word(
            UART0_CR,
            (Control::UARTEN | Control::TXE | Control::RXE).bits(),
        );

        debug!("PL011 up: 115200 8N1, pacing {:?}", self.pacing);
    }

    /// Sends one byte, paced per the configured [`TxPacing`].
    pub fn send(&mut self, byte: u8) {
        match self.pacing {
            TxPacing::FlagPoll => {
                while self.flags().contains(Flag::TXFF) {
                    core::hint::spin_loop();
                }
                self.mmio.write_word(UART0_DR, byte.into());
            }
            TxPacing::FixedDelay { per_byte, .. } => {
                self.mmio.write_word(UART0_DR, byte.into());
                self.mmio.delay(per_byte);
            }
        }
    }

    /// Sends every byte of a null-terminated string, in order, excluding
    /// the terminator.
    pub fn send_cstr(&mut self, s: &CStr) {
        self.send_bytes(s.to_bytes());
    }

    /// Sends a byte slice, applying the inter-character delay between bytes
    /// when the pacing policy has one.
    pub fn send_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.send(byte);
            if let TxPacing::FixedDelay { inter_char, .. } = self.pacing {
                self.mmio.delay(inter_char);
            }
        }
    }

    /// Sends a UTF-8 string. No newline translation is performed.
    pub fn send_str(&mut self, s: &str) {
        self.send_bytes(s.as_bytes());
    }

    /// Returns the next received byte, or `None` when the receive FIFO is
    /// empty. Never blocks.
    pub fn try_recv(&mut self) -> Option<u8> {
        if self.flags().contains(Flag::RXFE) {
            None
        } else {
            Some(self.mmio.read_word(UART0_DR) as u8)
        }
    }

    /// Blocks until a byte arrives and returns it.
    pub fn recv(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.try_recv() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Whether the transmit path is still shifting bits out.
    pub fn is_busy(&mut self) -> bool {
        self.flags().contains(Flag::BUSY)
    }

    /// Blocks until the transmit path drains.
    pub fn flush(&mut self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }

    pub(crate) fn flags(&mut self) -> Flag {
        Flag::from_bits_truncate(self.mmio.read_word(UART0_FR))
    }
}

impl<M: RegisterAccess> Write for Pl011<M> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_str(s);
        Ok(())
    }
}
