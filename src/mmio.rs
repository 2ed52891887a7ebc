//! The hardware access seam between the driver and the physical register
//! file.

#[cfg(test)]
pub mod fake;

/// The interface the driver uses to reach memory-mapped peripheral
/// registers.
///
/// The live implementation is [`PhysMmio`]; tests substitute a simulated
/// register bank. No operation can fail: an address outside the peripheral
/// window is a precondition violation, not a reportable error. Writes are
/// not idempotent from the device's point of view (storing to the interrupt
/// clear register mutates pending-interrupt state), so implementations must
/// perform every access exactly once, in program order.
pub trait RegisterAccess {
    /// Reads the 32-bit register at `addr`.
    fn read_word(&mut self, addr: usize) -> u32;

    /// Writes `value` to the 32-bit register at `addr`.
    fn write_word(&mut self, addr: usize, value: u32);

    /// Busy-waits for `count` spin iterations.
    ///
    /// The iteration time is unspecified; callers use this only where the
    /// hardware wants "a while" (pull-control setup) or as a pacing
    /// fallback, never as a calibrated clock.
    fn delay(&mut self, count: u32);
}

/// Register access over the live physical address space.
///
/// Performs volatile 32-bit loads and stores at the addresses it is given.
#[derive(Debug)]
pub struct PhysMmio {
    _private: (),
}

impl PhysMmio {
    /// Creates a handle on the physical peripheral window.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the BCM2835 peripheral registers are
    /// accessible at their physical addresses (identity-mapped or MMU off)
    /// and that no other execution context accesses them while this handle
    /// exists.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterAccess for PhysMmio {
    fn read_word(&mut self, addr: usize) -> u32 {
        // SAFETY: the constructor's contract guarantees `addr` resolves to a
        // device register this context may touch.
        unsafe { (addr as *const u32).read_volatile() }
    }

    fn write_word(&mut self, addr: usize, value: u32) {
        // SAFETY: as for `read_word`.
        unsafe { (addr as *mut u32).write_volatile(value) }
    }

    fn delay(&mut self, count: u32) {
        for _ in 0..count {
            core::hint::spin_loop();
        }
    }
}
