//! Fake register bank for unit tests.

use super::RegisterAccess;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

/// A simulated register bank recording every access the driver makes.
///
/// The driver takes the fake by value, so tests keep a clone of the shared
/// [`State`] and inspect it afterwards.
#[derive(Clone, Debug, Default)]
pub struct FakeMmio {
    pub state: Arc<Mutex<State>>,
}

impl FakeMmio {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Observable state of a [`FakeMmio`].
#[derive(Debug, Default)]
pub struct State {
    /// Last value written to each register.
    pub regs: BTreeMap<usize, u32>,
    /// Every write in program order.
    pub writes: Vec<(usize, u32)>,
    /// Address of every read in program order.
    pub reads: Vec<usize>,
    /// Every delay count in program order.
    pub delays: Vec<u32>,
    /// Scripted read values, consumed front-first before `regs` is
    /// consulted. Lets a test model a flag register that changes over time.
    scripted_reads: BTreeMap<usize, Vec<u32>>,
}

impl State {
    /// Queues `values` to be returned by successive reads of `addr`, ahead
    /// of whatever was last written there.
    pub fn script_reads(&mut self, addr: usize, values: &[u32]) {
        self.scripted_reads
            .entry(addr)
            .or_default()
            .extend_from_slice(values);
    }

    /// The values written to `addr`, in order.
    pub fn writes_to(&self, addr: usize) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl RegisterAccess for FakeMmio {
    fn read_word(&mut self, addr: usize) -> u32 {
        let mut state = self.state.lock().unwrap();
        state.reads.push(addr);
        if let Some(queue) = state.scripted_reads.get_mut(&addr) {
            if !queue.is_empty() {
                return queue.remove(0);
            }
        }
        state.regs.get(&addr).copied().unwrap_or(0)
    }

    fn write_word(&mut self, addr: usize, value: u32) {
        let mut state = self.state.lock().unwrap();
        state.regs.insert(addr, value);
        state.writes.push((addr, value));
    }

    fn delay(&mut self, count: u32) {
        self.state.lock().unwrap().delays.push(count);
    }
}
