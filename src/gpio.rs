//! GPIO pin muxing for the UART pins.
//!
//! Only the two operations UART bring-up needs: routing a pin to one of its
//! alternate functions and switching off its pull resistor.

use crate::mmio::RegisterAccess;
use crate::registers::{GPFSEL0, GPPUD, GPPUDCLK0, GPPUDCLK1};
use crate::{Error, Result};

/// Number of GPIO pins on the BCM2835.
const PIN_COUNT: u8 = 54;
/// Pins covered by each GPFSELn register, three bits apiece.
const PINS_PER_FSEL: u8 = 10;
/// Cycles to hold the pull control lines, per the datasheet's "wait 150
/// cycles" setup requirement.
const PULL_SETUP_CYCLES: u32 = 150;

/// A GPIO pin function, as encoded in the GPFSELn 3-bit fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Function {
    /// Input (reset state).
    Input = 0b000,
    /// Output.
    Output = 0b001,
    /// Alternate function 0. UART0 TXD/RXD on pins 14/15.
    Alt0 = 0b100,
    /// Alternate function 1.
    Alt1 = 0b101,
    /// Alternate function 2.
    Alt2 = 0b110,
    /// Alternate function 3.
    Alt3 = 0b111,
    /// Alternate function 4.
    Alt4 = 0b011,
    /// Alternate function 5.
    Alt5 = 0b010,
}

/// Routes `pin` to `function` via a read-modify-write of the pin's GPFSELn
/// register. Bits outside the pin's own 3-bit field are preserved.
pub fn set_function<M: RegisterAccess>(mmio: &mut M, pin: u8, function: Function) -> Result {
    if pin >= PIN_COUNT {
        return Err(Error::InvalidPin(pin));
    }
    let reg = GPFSEL0 + usize::from(pin / PINS_PER_FSEL) * 4;
    let shift = u32::from(pin % PINS_PER_FSEL) * 3;
    let mut selector = mmio.read_word(reg);
    selector &= !(0b111 << shift);
    selector |= (function as u32) << shift;
    mmio.write_word(reg, selector);
    Ok(())
}

/// Disables the pull-up/down resistors on `pins`.
///
/// The hardware has no way to read the current pull state back; the
/// documented sequence is: program GPPUD with the wanted mode (off), wait
/// 150 cycles, clock the affected pins via GPPUDCLKn, wait 150 cycles, then
/// release the clock lines.
pub fn disable_pull<M: RegisterAccess>(mmio: &mut M, pins: &[u8]) -> Result {
    let mut clocks = [0u32; 2];
    for &pin in pins {
        if pin >= PIN_COUNT {
            return Err(Error::InvalidPin(pin));
        }
        clocks[usize::from(pin / 32)] |= 1 << (pin % 32);
    }

    mmio.write_word(GPPUD, 0);
    mmio.delay(PULL_SETUP_CYCLES);
    for (bank, &mask) in clocks.iter().enumerate() {
        if mask != 0 {
            mmio.write_word(pud_clock_reg(bank), mask);
        }
    }
    mmio.delay(PULL_SETUP_CYCLES);
    for (bank, &mask) in clocks.iter().enumerate() {
        if mask != 0 {
            mmio.write_word(pud_clock_reg(bank), 0);
        }
    }
    Ok(())
}

fn pud_clock_reg(bank: usize) -> usize {
    if bank == 0 {
        GPPUDCLK0
    } else {
        GPPUDCLK1
    }
}
