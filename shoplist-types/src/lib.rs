//! Shared identifier and error-classification types for the shopping-list
//! cluster: [`ListId`], [`ItemId`], [`NodeId`], and [`ErrorKind`].

mod error_kind;
mod ids;

pub use error_kind::ErrorKind;
pub use ids::{ItemId, ListId, NodeId};
