//! Stateless request router mapping `list_id` to its primary node.
//!
//! Corresponds to the reference implementation's ROUTER-ROUTER proxy: a
//! single frontend (clients) and backend (nodes) bound at well-known
//! addresses, with `ping` answered directly and everything else hashed
//! against the ring. The broker holds no CRDT state of its own.

mod dispatch;
mod error;
mod router;

pub use dispatch::NodeDispatch;
pub use error::{BrokerError, BrokerResult};
pub use router::Broker;
