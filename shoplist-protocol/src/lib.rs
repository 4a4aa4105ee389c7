//! Wire schema and codec shared by the broker, node, and client.

mod codec;
mod error;
mod wire;

pub use codec::{read_message, write_message};
pub use error::{ProtocolError, ProtocolResult};
pub use wire::{ItemWire, Message, NodeState, PnWire, Response, ShoppingListWire};
