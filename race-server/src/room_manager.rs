use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use race_core::{Departure, RoomError, RoomRegistry};
use race_types::{Player, PlayerStats};

use crate::websocket::connection::ConnectionId;

/// Snapshot of a freshly created room.
#[derive(Debug, Clone)]
pub struct CreatedRoom {
    pub room_id: String,
    pub players: Vec<Player>,
}

/// Async owner of the room registry. Every mutation takes the registry
/// write lock first and the index lock second, so event handlers are atomic
/// with respect to each other; the fan-out layer never touches this state.
///
/// `connection_rooms` maps each connection to the room it joined, making
/// disconnect cleanup O(1) instead of a scan over all live rooms.
pub struct RoomManager {
    registry: RwLock<RoomRegistry>,
    connection_rooms: RwLock<HashMap<ConnectionId, String>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(RoomRegistry::new()),
            connection_rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a room hosted by `connection_id`.
    pub async fn create_room(&self, connection_id: ConnectionId, player_name: &str) -> CreatedRoom {
        let mut registry = self.registry.write().await;
        let mut index = self.connection_rooms.write().await;

        let room = registry.create_room(connection_id.as_uuid(), player_name);
        let created = CreatedRoom {
            room_id: room.id.clone(),
            players: room.players.clone(),
        };
        index.insert(connection_id, created.room_id.clone());

        info!(
            "Connection {} created room {}",
            connection_id, created.room_id
        );
        created
    }

    /// Adds `connection_id` to a live room and returns the updated player
    /// list for broadcast.
    pub async fn join_room(
        &self,
        room_id: &str,
        connection_id: ConnectionId,
        player_name: &str,
    ) -> Result<Vec<Player>, RoomError> {
        let mut registry = self.registry.write().await;
        let mut index = self.connection_rooms.write().await;

        let room = registry.join_room(room_id, connection_id.as_uuid(), player_name)?;
        index.insert(connection_id, room.id.clone());

        info!("Connection {} joined room {}", connection_id, room_id);
        Ok(room.players.clone())
    }

    pub async fn room_exists(&self, room_id: &str) -> bool {
        self.registry.read().await.contains(room_id)
    }

    /// Upserts a stats report and returns the room's full current list.
    pub async fn record_stats(&self, room_id: &str, stats: PlayerStats) -> Vec<PlayerStats> {
        let mut registry = self.registry.write().await;
        registry.upsert_stats(room_id, stats).to_vec()
    }

    /// Removes the departing connection from its room, if it was in one.
    /// On a host departure the surviving members' index entries are purged
    /// along with the room.
    pub async fn handle_disconnect(&self, connection_id: ConnectionId) -> Option<Departure> {
        let mut registry = self.registry.write().await;
        let mut index = self.connection_rooms.write().await;

        let room_id = index.remove(&connection_id)?;
        let departure = registry.remove_player(&room_id, connection_id.as_uuid());

        if matches!(departure, Some(Departure::HostLeft { .. })) {
            index.retain(|_, joined| joined != &room_id);
        }

        departure
    }

    // Test helper methods
    pub async fn room_count(&self) -> usize {
        self.registry.read().await.room_count()
    }

    pub async fn players(&self, room_id: &str) -> Option<Vec<Player>> {
        self.registry
            .read()
            .await
            .room(room_id)
            .map(|room| room.players.clone())
    }

    pub async fn stats(&self, room_id: &str) -> Option<Vec<PlayerStats>> {
        self.registry
            .read()
            .await
            .stats(room_id)
            .map(|entries| entries.to_vec())
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
