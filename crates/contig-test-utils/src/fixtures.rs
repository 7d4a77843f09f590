//! Element fixtures for exercising container element-operation paths.
//!
//! A [`ProbeLedger`] mints [`Probe`] values and counts, across all of them:
//!
//! - copy constructions (`Clone::clone`),
//! - copy assignments (`Clone::clone_from`),
//! - destructions (`Drop`).
//!
//! It can also be armed to panic on the k-th copy or assignment from now,
//! which is how tests simulate an element operation failing part way
//! through a container operation.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    minted: Cell<usize>,
    clones: Cell<usize>,
    assigns: Cell<usize>,
    drops: Cell<usize>,
    /// Copy number (in `clones`) that panics instead of completing.
    clone_trap: Cell<Option<usize>>,
    /// Assignment number (in `assigns`) that panics instead of completing.
    assign_trap: Cell<Option<usize>>,
}

/// Shared counters for a family of [`Probe`]s.
#[derive(Clone, Default)]
pub struct ProbeLedger {
    counters: Rc<Counters>,
}

impl ProbeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh probe carrying `value`. Not counted as a copy.
    pub fn make(&self, value: i64) -> Probe {
        bump(&self.counters.minted);
        Probe {
            value,
            ledger: self.clone(),
        }
    }

    /// Probes for each value, in order.
    pub fn make_all(&self, values: &[i64]) -> Vec<Probe> {
        values.iter().map(|&v| self.make(v)).collect()
    }

    pub fn clones(&self) -> usize {
        self.counters.clones.get()
    }

    pub fn assigns(&self) -> usize {
        self.counters.assigns.get()
    }

    pub fn drops(&self) -> usize {
        self.counters.drops.get()
    }

    /// Probes currently alive: minted plus copied, minus destroyed.
    pub fn live(&self) -> usize {
        self.counters.minted.get() + self.counters.clones.get() - self.counters.drops.get()
    }

    /// Make the `k`-th copy from now (1-based) panic.
    pub fn panic_on_clone(&self, k: usize) {
        self.counters.clone_trap.set(Some(self.clones() + k));
    }

    /// Make the `k`-th copy assignment from now (1-based) panic.
    pub fn panic_on_assign(&self, k: usize) {
        self.counters.assign_trap.set(Some(self.assigns() + k));
    }

    /// Clear both traps.
    pub fn disarm(&self) {
        self.counters.clone_trap.set(None);
        self.counters.assign_trap.set(None);
    }

    fn spring(trap: &Cell<Option<usize>>, count: &Cell<usize>, what: &str) {
        let next = count.get() + 1;
        if trap.get() == Some(next) {
            trap.set(None);
            panic!("probe {what} #{next} failed");
        }
        count.set(next);
    }
}

impl fmt::Debug for ProbeLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeLedger")
            .field("clones", &self.clones())
            .field("assigns", &self.assigns())
            .field("drops", &self.drops())
            .field("live", &self.live())
            .finish()
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// An instrumented element. Compares and orders by its value only.
pub struct Probe {
    value: i64,
    ledger: ProbeLedger,
}

impl Probe {
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        let counters = &self.ledger.counters;
        ProbeLedger::spring(&counters.clone_trap, &counters.clones, "clone");
        Self {
            value: self.value,
            ledger: self.ledger.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let counters = &self.ledger.counters;
        ProbeLedger::spring(&counters.assign_trap, &counters.assigns, "assign");
        self.value = source.value;
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        bump(&self.ledger.counters.drops);
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Probe {}

impl PartialEq<i64> for Probe {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl PartialOrd for Probe {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Probe {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe({})", self.value)
    }
}
