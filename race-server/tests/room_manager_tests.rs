
use race_core::Departure;
use race_server::websocket::connection::ConnectionId;
use test_helpers::*;

#[tokio::test]
async fn test_create_room_registers_single_host() {
    let setup = TestCoordinatorSetup::new();

    let (room_id, host, _) = setup.create_room_with_members("Alice", &[]).await;

    assert!(setup.room_manager.room_exists(&room_id).await);
    let players = setup.room_manager.players(&room_id).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id, host.as_uuid());
    assert!(players[0].is_host);
}

#[tokio::test]
async fn test_join_preserves_order_and_single_host() {
    let setup = TestCoordinatorSetup::new();

    let (room_id, _, _) = setup
        .create_room_with_members("Alice", &["Bob", "Carol"])
        .await;

    let players = setup.room_manager.players(&room_id).await.unwrap();
    let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol"]);
    assert_eq!(players.iter().filter(|p| p.is_host).count(), 1);
}

#[tokio::test]
async fn test_join_unknown_room_fails() {
    let setup = TestCoordinatorSetup::new();

    let result = setup
        .room_manager
        .join_room("ZZZZZZZZ", ConnectionId::new(), "Eve")
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Room does not exist.");
    assert_eq!(setup.room_manager.room_count().await, 0);
}

#[tokio::test]
async fn test_host_disconnect_destroys_room_and_stats() {
    let setup = TestCoordinatorSetup::new();

    let (room_id, host, _) = setup
        .create_room_with_members("Alice", &["Bob", "Carol"])
        .await;
    setup
        .room_manager
        .record_stats(&room_id, stats_entry("u1", 50))
        .await;

    let departure = setup.room_manager.handle_disconnect(host).await.unwrap();

    match departure {
        Departure::HostLeft { players, .. } => assert_eq!(players.len(), 2),
        other => panic!("Expected HostLeft, got {:?}", other),
    }
    assert!(!setup.room_manager.room_exists(&room_id).await);
    assert!(setup.room_manager.stats(&room_id).await.is_none());

    // The survivors' index entries died with the room: their own later
    // disconnects find nothing to clean up.
    let rejoin = setup
        .room_manager
        .join_room(&room_id, ConnectionId::new(), "Dave")
        .await;
    assert!(rejoin.is_err());
}

#[tokio::test]
async fn test_survivor_disconnect_after_host_left_is_clean() {
    let setup = TestCoordinatorSetup::new();

    let (_, host, members) = setup.create_room_with_members("Alice", &["Bob"]).await;

    setup.room_manager.handle_disconnect(host).await.unwrap();

    let departure = setup.room_manager.handle_disconnect(members[0]).await;
    assert!(departure.is_none());
}

#[tokio::test]
async fn test_member_disconnect_keeps_room_alive() {
    let setup = TestCoordinatorSetup::new();

    let (room_id, _, members) = setup.create_room_with_members("Alice", &["Bob"]).await;

    let departure = setup
        .room_manager
        .handle_disconnect(members[0])
        .await
        .unwrap();

    match departure {
        Departure::PlayerLeft { players, .. } => {
            assert_eq!(players.len(), 1);
            assert_eq!(players[0].name, "Alice");
        }
        other => panic!("Expected PlayerLeft, got {:?}", other),
    }
    assert!(setup.room_manager.room_exists(&room_id).await);
}

#[tokio::test]
async fn test_disconnect_without_room_is_noop() {
    let setup = TestCoordinatorSetup::new();

    let departure = setup.room_manager.handle_disconnect(ConnectionId::new()).await;

    assert!(departure.is_none());
}

#[tokio::test]
async fn test_stats_upsert_keeps_latest_report() {
    let setup = TestCoordinatorSetup::new();

    let (room_id, _, _) = setup.create_room_with_members("Alice", &[]).await;

    setup
        .room_manager
        .record_stats(&room_id, stats_entry("u1", 50))
        .await;
    let stats = setup
        .room_manager
        .record_stats(&room_id, stats_entry("u1", 80))
        .await;

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].user_id, "u1");
    assert_eq!(stats[0].metrics["wpm"], 80);
}

#[tokio::test]
async fn test_concurrent_room_creation_yields_unique_codes() {
    let setup = std::sync::Arc::new(TestCoordinatorSetup::new());
    let mut handles = Vec::new();

    for _ in 0..20 {
        let room_manager = setup.room_manager.clone();
        handles.push(tokio::spawn(async move {
            room_manager
                .create_room(ConnectionId::new(), "Player")
                .await
                .room_id
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        assert!(codes.insert(handle.await.unwrap()));
    }

    assert_eq!(setup.room_manager.room_count().await, 20);
}
