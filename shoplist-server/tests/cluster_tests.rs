use std::sync::Arc;

use shoplist_broker::Broker;
use shoplist_client::{Client, TcpTransport};
use shoplist_cluster::{ConsistentHash, GossipState, ReplicationManager};
use shoplist_node::{NoopReplicator, Node};
use shoplist_server::{serve_broker_on, serve_node_on, TcpDispatch};
use shoplist_storage::ShoppingListManager;
use shoplist_types::{ListId, NodeId};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// Brings up a single node and the broker on ephemeral loopback ports, and
/// returns a connected client pointed at the broker.
async fn single_node_cluster() -> Client {
    let node_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let node_addr = node_listener.local_addr().unwrap();

    let mut ring = ConsistentHash::default();
    ring.add_node_with_address(NodeId::new("node1"), format!("tcp://{node_addr}"));
    let ring = Arc::new(RwLock::new(ring));

    let node = Arc::new(Node::new(
        NodeId::new("node1"),
        ring.clone(),
        ReplicationManager::new(1),
        Arc::new(RwLock::new(ShoppingListManager::new())),
        Arc::new(RwLock::new(GossipState::new())),
        Arc::new(NoopReplicator),
    ));
    tokio::spawn(serve_node_on(node, node_listener));

    let broker_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let broker_addr = broker_listener.local_addr().unwrap();
    let broker = Arc::new(Broker::new(ring.clone(), Arc::new(TcpDispatch::new(ring))));
    tokio::spawn(serve_broker_on(broker, broker_listener));

    let transport = TcpTransport::connect(&broker_addr.to_string())
        .await
        .unwrap();
    Client::new(Arc::new(transport))
}

#[tokio::test]
async fn ping_reports_server_available() {
    let client = single_node_cluster().await;
    assert!(client.ping().await);
}

#[tokio::test]
async fn create_write_read_roundtrip_through_real_tcp() {
    let client = single_node_cluster().await;
    let list_id = ListId::from_string("groceries");

    client.create_shopping_list(list_id.clone()).await.unwrap();

    let mut list = shoplist_crdt::ShoppingList::new();
    list.add_item("milk", 2);

    let merged = client
        .write_shopping_list(list_id.clone(), &list)
        .await
        .unwrap();
    assert_eq!(merged.items().len(), 1);

    let read_back = client.get_shopping_list(list_id.clone()).await.unwrap();
    assert_eq!(read_back.items().len(), 1);

    client.delete_shopping_list(list_id.clone()).await.unwrap();
    let after_delete = client.get_shopping_list(list_id).await;
    assert!(after_delete.is_err());
}
