//! CRDT implementations for the shopping-list cluster.
//!
//! - [`PnCounter`] — Positive-Negative Counter for distributed inc/dec
//! - [`OrSet<T>`] — Observed-Remove Set for collections of unique ids
//! - [`OrMap`] — Observed-Remove Map with an acquired-item lifecycle
//! - [`ShoppingList`] — the item-id-minting facade over [`OrMap`]
//!
//! All CRDTs in this crate satisfy the following properties:
//! - **Commutative**: merge(a, b) == merge(b, a)
//! - **Associative**: merge(merge(a, b), c) == merge(a, merge(b, c))
//! - **Idempotent**: merge(a, a) == a
//!
//! These properties ensure that replicas will converge to the same state
//! regardless of the order in which operations are received.

mod or_map;
mod or_set;
mod pn_counter;
mod shopping_list;

pub use or_map::{Entry as OrMapEntry, OrMap};
pub use or_set::OrSet;
pub use pn_counter::PnCounter;
pub use shopping_list::ShoppingList;
