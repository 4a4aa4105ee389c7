use std::sync::Arc;

use shoplist_cluster::{ConsistentHash, GossipState, ReplicationManager};
use shoplist_node::{Node, NoopReplicator};
use shoplist_protocol::{Message, Response, ShoppingListWire};
use shoplist_storage::ShoppingListManager;
use shoplist_types::{ListId, NodeId};
use tokio::sync::RwLock;

fn build_node(id: &str) -> Node {
    let mut ring = ConsistentHash::default();
    ring.add_node(NodeId::new(id));
    Node::new(
        NodeId::new(id),
        Arc::new(RwLock::new(ring)),
        ReplicationManager::new(1),
        Arc::new(RwLock::new(ShoppingListManager::new())),
        Arc::new(RwLock::new(GossipState::new())),
        Arc::new(NoopReplicator),
    )
}

#[tokio::test]
async fn ping_responds_success() {
    let node = build_node("node1");
    let response = node.handle(Message::Ping).await;
    assert!(matches!(response, Response::Success));
}

#[tokio::test]
async fn create_then_read_roundtrips() {
    let node = build_node("node1");
    let list_id = ListId::from_string("groceries");

    let created = node
        .handle(Message::Create {
            list_id: list_id.clone(),
        })
        .await;
    assert!(matches!(created, Response::ListId { .. }));

    let read = node
        .handle(Message::Read {
            list_id: list_id.clone(),
        })
        .await;
    assert!(matches!(read, Response::ShoppingList { .. }));
}

#[tokio::test]
async fn create_twice_errors() {
    let node = build_node("node1");
    let list_id = ListId::from_string("groceries");

    node.handle(Message::Create {
        list_id: list_id.clone(),
    })
    .await;
    let second = node
        .handle(Message::Create {
            list_id: list_id.clone(),
        })
        .await;
    assert!(matches!(second, Response::Error { .. }));
}

#[tokio::test]
async fn write_to_absent_list_creates_it_and_merges() {
    let node = build_node("node1");
    let list_id = ListId::from_string("groceries");

    let mut list = shoplist_crdt::ShoppingList::new();
    list.add_item("milk", 2);

    let response = node
        .handle(Message::Write {
            list_id: list_id.clone(),
            shopping_list: ShoppingListWire::from(&list),
        })
        .await;

    match response {
        Response::ShoppingList { shopping_list } => {
            let restored = shoplist_crdt::ShoppingList::from(&shopping_list);
            assert_eq!(restored.items().len(), 1);
        }
        other => panic!("expected ShoppingList response, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_then_write_is_rejected_as_conflict() {
    let node = build_node("node1");
    let list_id = ListId::from_string("groceries");

    node.handle(Message::Create {
        list_id: list_id.clone(),
    })
    .await;
    node.handle(Message::Delete {
        list_id: list_id.clone(),
    })
    .await;

    let response = node
        .handle(Message::Write {
            list_id: list_id.clone(),
            shopping_list: ShoppingListWire::default(),
        })
        .await;
    assert!(matches!(response, Response::Error { .. }));
}

#[tokio::test]
async fn replicate_with_none_payload_deletes_locally() {
    let node = build_node("node1");
    let list_id = ListId::from_string("groceries");

    node.handle(Message::Create {
        list_id: list_id.clone(),
    })
    .await;

    let response = node
        .handle(Message::Replicate {
            list_id: list_id.clone(),
            shopping_list: None,
        })
        .await;
    assert!(matches!(response, Response::Success));

    let read = node
        .handle(Message::Read {
            list_id: list_id.clone(),
        })
        .await;
    assert!(matches!(read, Response::Error { .. }));
}
