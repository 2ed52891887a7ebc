//! Physical register map of the UART0 and GPIO peripherals.
//!
//! Addresses are for the BCM2837 peripheral window at `0x3F00_0000` (Pi 2/3,
//! and what QEMU's `raspi2b`/`raspi3b` machines emulate).
//!
//! Ref: BCM2835 ARM Peripherals, §6 (GPIO) and §13 (UART).

use bitflags::bitflags;

const MMIO_BASE: usize = 0x3F00_0000;
const GPIO_BASE: usize = MMIO_BASE + 0x20_0000;
const UART0_BASE: usize = MMIO_BASE + 0x20_1000;

/// GPIO function select 0, pins 0–9.
pub const GPFSEL0: usize = GPIO_BASE + 0x00;
/// GPIO function select 1, pins 10–19 (the UART0 TX/RX pins live here).
pub const GPFSEL1: usize = GPIO_BASE + 0x04;
/// GPIO pull-up/down mode.
pub const GPPUD: usize = GPIO_BASE + 0x94;
/// GPIO pull-up/down clock, pins 0–31.
pub const GPPUDCLK0: usize = GPIO_BASE + 0x98;
/// GPIO pull-up/down clock, pins 32–53.
pub const GPPUDCLK1: usize = GPIO_BASE + 0x9C;

/// Data register.
pub const UART0_DR: usize = UART0_BASE + 0x00;
/// Flag register.
pub const UART0_FR: usize = UART0_BASE + 0x18;
/// Integer baud rate divisor.
pub const UART0_IBRD: usize = UART0_BASE + 0x24;
/// Fractional baud rate divisor.
pub const UART0_FBRD: usize = UART0_BASE + 0x28;
/// Line control register.
pub const UART0_LCRH: usize = UART0_BASE + 0x2C;
/// Control register.
pub const UART0_CR: usize = UART0_BASE + 0x30;
/// Interrupt mask set/clear register.
pub const UART0_IMSC: usize = UART0_BASE + 0x38;
/// Interrupt clear register.
pub const UART0_ICR: usize = UART0_BASE + 0x44;

/// GPIO pin carrying UART0 TXD in its Alt0 function.
pub const UART0_TX_PIN: u8 = 14;
/// GPIO pin carrying UART0 RXD in its Alt0 function.
pub const UART0_RX_PIN: u8 = 15;

/// Fixed baud divisor pair for 115200 baud; the rate is not runtime
/// configurable.
pub const BAUD_DIVISOR: (u32, u32) = (26, 3);

bitflags! {
    /// Flag register bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Flag: u32 {
        /// UART busy transmitting.
        const BUSY = 1 << 3;
        /// Receive FIFO empty.
        const RXFE = 1 << 4;
        /// Transmit FIFO full.
        const TXFF = 1 << 5;
    }
}

bitflags! {
    /// Control register bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Control: u32 {
        /// UART enable.
        const UARTEN = 1 << 0;
        /// Transmit path enable.
        const TXE = 1 << 8;
        /// Receive path enable.
        const RXE = 1 << 9;
    }
}

bitflags! {
    /// Line control register bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct LineControl: u32 {
        /// Enable transmit and receive FIFOs.
        const FEN = 1 << 4;
        /// 8-bit word length (no parity, one stop bit).
        const WLEN8 = 0b11 << 5;
    }
}

bitflags! {
    /// The eleven defined UART interrupt bits, shared by the clear (ICR)
    /// and mask (IMSC) registers.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Interrupt: u32 {
        /// nUARTRI modem interrupt.
        const RIM = 1 << 0;
        /// nUARTCTS modem interrupt.
        const CTSM = 1 << 1;
        /// nUARTDCD modem interrupt.
        const DCDM = 1 << 2;
        /// nUARTDSR modem interrupt.
        const DSRM = 1 << 3;
        /// Receive interrupt.
        const RX = 1 << 4;
        /// Transmit interrupt.
        const TX = 1 << 5;
        /// Receive timeout interrupt.
        const RT = 1 << 6;
        /// Framing error interrupt.
        const FE = 1 << 7;
        /// Parity error interrupt.
        const PE = 1 << 8;
        /// Break error interrupt.
        const BE = 1 << 9;
        /// Overrun error interrupt.
        const OE = 1 << 10;
    }
}

impl Interrupt {
    /// The sources masked during initialisation: everything the PL011 can
    /// raise on this pinout. The RI/DCD/DSR modem lines are not wired up on
    /// these boards and their mask bits are left alone.
    pub const MASKED_SOURCES: Interrupt = Interrupt::CTSM
        .union(Interrupt::RX)
        .union(Interrupt::TX)
        .union(Interrupt::RT)
        .union(Interrupt::FE)
        .union(Interrupt::PE)
        .union(Interrupt::BE)
        .union(Interrupt::OE);
}
