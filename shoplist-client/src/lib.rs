//! Non-interactive client stub for `create`/`read`/`write`/`delete`/`ping`
//! against the broker.

mod client;
mod error;
mod tcp;
mod transport;

pub use client::Client;
pub use error::{ClientError, ClientResult};
pub use tcp::TcpTransport;
pub use transport::ClientTransport;
