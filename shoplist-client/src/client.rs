//! The non-interactive client stub.
//!
//! Mirrors the reference implementation's `Client`: availability is
//! ping-gated and cached, every other operation is `send_request` plus a
//! thin payload/response shape. Unlike the reference, a failed ping or
//! request does not silently return the raw request back to the caller —
//! it surfaces as a [`ClientError`].

use std::sync::Arc;

use shoplist_crdt::ShoppingList;
use shoplist_protocol::{Message, Response, ShoppingListWire};
use shoplist_types::ListId;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::ClientError;
use crate::transport::ClientTransport;

/// A handle to the broker, gating requests on a cached availability check.
pub struct Client {
    transport: Arc<dyn ClientTransport>,
    available: Mutex<bool>,
}

impl Client {
    /// Wraps a transport. Availability starts unknown and is probed lazily
    /// on first use, just like the reference implementation's client.
    #[must_use]
    pub fn new(transport: Arc<dyn ClientTransport>) -> Self {
        Self {
            transport,
            available: Mutex::new(false),
        }
    }

    /// Pings the broker and caches the result.
    pub async fn ping(&self) -> bool {
        let ok = matches!(
            self.transport.request(Message::Ping).await,
            Some(Response::Success)
        );
        *self.available.lock().await = ok;
        ok
    }

    async fn send_request(&self, message: Message) -> Result<Response, ClientError> {
        if !*self.available.lock().await && !self.ping().await {
            warn!("server is not available");
            return Err(ClientError::ServerUnavailable);
        }

        match self.transport.request(message).await {
            Some(Response::Error { kind, message }) => Err(ClientError::Remote { kind, message }),
            Some(response) => Ok(response),
            None => {
                *self.available.lock().await = false;
                Err(ClientError::ServerUnavailable)
            }
        }
    }

    /// Creates a new list under `list_id`.
    pub async fn create_shopping_list(&self, list_id: ListId) -> Result<ListId, ClientError> {
        match self
            .send_request(Message::Create {
                list_id: list_id.clone(),
            })
            .await?
        {
            Response::ListId { list_id } => Ok(list_id),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Fetches `list_id`'s current merged state.
    pub async fn get_shopping_list(&self, list_id: ListId) -> Result<ShoppingList, ClientError> {
        match self.send_request(Message::Read { list_id }).await? {
            Response::ShoppingList { shopping_list } => Ok(ShoppingList::from(&shopping_list)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Merges `list` into the primary's copy of `list_id`, returning the
    /// node's post-merge state.
    pub async fn write_shopping_list(
        &self,
        list_id: ListId,
        list: &ShoppingList,
    ) -> Result<ShoppingList, ClientError> {
        match self
            .send_request(Message::Write {
                list_id,
                shopping_list: ShoppingListWire::from(list),
            })
            .await?
        {
            Response::ShoppingList { shopping_list } => Ok(ShoppingList::from(&shopping_list)),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }

    /// Deletes `list_id`.
    pub async fn delete_shopping_list(&self, list_id: ListId) -> Result<ListId, ClientError> {
        match self.send_request(Message::Delete { list_id }).await? {
            Response::ListId { list_id } => Ok(list_id),
            _ => Err(ClientError::UnexpectedResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeTransport {
        up: AtomicBool,
    }

    #[async_trait]
    impl ClientTransport for FakeTransport {
        async fn request(&self, message: Message) -> Option<Response> {
            if !self.up.load(Ordering::SeqCst) {
                return None;
            }
            match message {
                Message::Ping => Some(Response::Success),
                Message::Create { list_id } => Some(Response::ListId { list_id }),
                Message::Read { .. } => Some(Response::ShoppingList {
                    shopping_list: ShoppingListWire::from(&ShoppingList::new()),
                }),
                Message::Write { shopping_list, .. } => {
                    Some(Response::ShoppingList { shopping_list })
                }
                Message::Delete { list_id } => Some(Response::ListId { list_id }),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn ping_failure_blocks_further_requests() {
        let transport = Arc::new(FakeTransport {
            up: AtomicBool::new(false),
        });
        let client = Client::new(transport);

        let result = client.create_shopping_list(ListId::from_string("groceries")).await;
        assert!(matches!(result, Err(ClientError::ServerUnavailable)));
    }

    #[tokio::test]
    async fn create_then_read_roundtrips_through_fake_transport() {
        let transport = Arc::new(FakeTransport {
            up: AtomicBool::new(true),
        });
        let client = Client::new(transport);

        let list_id = client
            .create_shopping_list(ListId::from_string("groceries"))
            .await
            .unwrap();
        assert_eq!(list_id.as_str(), "groceries");

        let list = client.get_shopping_list(list_id).await.unwrap();
        assert!(list.items().is_empty());
    }

    #[tokio::test]
    async fn availability_is_cached_across_calls() {
        let transport = Arc::new(FakeTransport {
            up: AtomicBool::new(true),
        });
        let client = Client::new(transport);

        assert!(client.ping().await);
        assert!(*client.available.lock().await);
    }
}
