//! Positive-Negative Counter CRDT.
//!
//! Tracks a quantity as two monotone-growing totals, positive (`p`) and
//! negative (`n`); the logical value is `p - n`. Unlike a per-peer PN-Counter,
//! this is a flat scalar pair — the OR-Map already partitions state per item
//! and per replica, so attributing increments to individual peers at this
//! layer would be redundant.
//!
//! Satisfies commutativity, associativity, and idempotency for `merge_max`.

use serde::{Deserialize, Serialize};

/// A Positive-Negative Counter CRDT over a single scalar quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnCounter {
    p: u64,
    n: u64,
}

impl PnCounter {
    /// Creates a new counter at `(0, 0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the positive total by `amount`.
    pub fn increment(&mut self, amount: u64) {
        self.p += amount;
    }

    /// Increments the negative total by `amount`.
    pub fn decrement(&mut self, amount: u64) {
        self.n += amount;
    }

    /// Returns the current logical value, `p - n`.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.p as i64 - self.n as i64
    }

    /// Returns the raw `(p, n)` pair.
    #[must_use]
    pub fn components(&self) -> (u64, u64) {
        (self.p, self.n)
    }

    /// Forces both totals to zero — used when tombstoning an item.
    pub fn zero_out(&mut self) {
        self.p = 0;
        self.n = 0;
    }

    /// Merges another counter into this one by taking the componentwise
    /// maximum of `p` and `n`. Idempotent, commutative, associative.
    pub fn merge_max(&mut self, other: &Self) {
        self.p = self.p.max(other.p);
        self.n = self.n.max(other.n);
    }

    /// Returns a new counter that is the `merge_max` of this and another.
    #[must_use]
    pub fn merged_max(&self, other: &Self) -> Self {
        let mut result = *self;
        result.merge_max(other);
        result
    }

    /// Additive merge: sums both totals. Not used on the hot merge path —
    /// kept for tests/legacy compatibility with the original source, which
    /// exposed both `merge` (sum) and `merge_max`.
    pub fn merge_sum(&mut self, other: &Self) {
        self.p += other.p;
        self.n += other.n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counter_is_zero() {
        let c = PnCounter::new();
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn increment_increases_value() {
        let mut c = PnCounter::new();
        c.increment(5);
        assert_eq!(c.value(), 5);
        c.increment(3);
        assert_eq!(c.value(), 8);
    }

    #[test]
    fn decrement_decreases_value() {
        let mut c = PnCounter::new();
        c.increment(10);
        c.decrement(3);
        assert_eq!(c.value(), 7);
    }

    #[test]
    fn value_can_go_negative() {
        let mut c = PnCounter::new();
        c.decrement(5);
        assert_eq!(c.value(), -5);
    }

    #[test]
    fn merge_max_is_commutative() {
        let mut a = PnCounter::new();
        a.increment(3);
        a.decrement(1);

        let mut b = PnCounter::new();
        b.increment(5);
        b.decrement(2);

        let ab = a.merged_max(&b);
        let ba = b.merged_max(&a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn merge_max_is_associative() {
        let mut a = PnCounter::new();
        a.increment(1);
        let mut b = PnCounter::new();
        b.increment(2);
        let mut c = PnCounter::new();
        c.decrement(1);

        let ab_c = a.merged_max(&b).merged_max(&c);
        let a_bc = a.merged_max(&b.merged_max(&c));
        assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn merge_max_is_idempotent() {
        let mut a = PnCounter::new();
        a.increment(5);
        a.decrement(2);

        let aa = a.merged_max(&a);
        assert_eq!(a, aa);
    }

    #[test]
    fn merge_max_takes_max_of_each_component() {
        let mut a = PnCounter::new();
        a.increment(5);
        a.decrement(10);

        let mut b = PnCounter::new();
        b.increment(8);
        b.decrement(3);

        let merged = a.merged_max(&b);
        assert_eq!(merged.components(), (8, 10));
        assert_eq!(merged.value(), -2);
    }

    #[test]
    fn zero_out_resets_value() {
        let mut c = PnCounter::new();
        c.increment(10);
        c.decrement(4);
        c.zero_out();
        assert_eq!(c.value(), 0);
        assert_eq!(c.components(), (0, 0));
    }

    #[test]
    fn merge_sum_adds_components() {
        let mut a = PnCounter::new();
        a.increment(3);
        let mut b = PnCounter::new();
        b.increment(4);
        a.merge_sum(&b);
        assert_eq!(a.components(), (7, 0));
    }

    #[test]
    fn serialization_roundtrip() {
        let mut c = PnCounter::new();
        c.increment(10);
        c.decrement(3);

        let json = serde_json::to_string(&c).unwrap();
        let parsed: PnCounter = serde_json::from_str(&json).unwrap();

        assert_eq!(c, parsed);
        assert_eq!(parsed.value(), 7);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut c = PnCounter::new();
        c.increment(7);
        c.decrement(2);

        let empty = PnCounter::new();
        assert_eq!(c.merged_max(&empty), c);
        assert_eq!(empty.merged_max(&c), c);
    }
}
