use std::collections::HashMap;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use race_types::{Player, PlayerStats};

use crate::room_code;

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room does not exist.")]
    RoomNotFound { room_id: String },
}

/// A live room. Present in the registry iff it holds at least one player;
/// the creating host sits at index 0 of `players`.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub players: Vec<Player>,
}

impl Room {
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host)
    }
}

/// What happened to a room when one of its players was removed.
#[derive(Debug, Clone)]
pub enum Departure {
    /// The host left. Room and stats are gone; `players` is the surviving
    /// membership that still needs the closing broadcast.
    HostLeft { room_id: String, players: Vec<Player> },
    /// The last remaining player left. Room and stats are gone and nobody
    /// is left to notify.
    RoomEmptied { room_id: String },
    /// An ordinary member left; `players` is the updated list to broadcast.
    PlayerLeft { room_id: String, players: Vec<Player> },
}

/// Owns every live [`Room`] and the per-room stats reports. All mutations
/// flow through the session coordinator; no other component holds a handle
/// to these maps.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
    stats: HashMap<String, Vec<PlayerStats>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a room with `player_id` as its host and returns it.
    pub fn create_room(&mut self, player_id: Uuid, player_name: &str) -> &Room {
        let code = room_code::generate_code(|c| self.rooms.contains_key(c));
        let host = Player {
            id: player_id,
            name: player_name.to_string(),
            is_host: true,
        };
        let room = Room {
            id: code.clone(),
            players: vec![host],
        };

        info!("Created room {}", code);
        self.rooms.entry(code).or_insert(room)
    }

    /// Appends a non-host player to a live room and returns it.
    pub fn join_room(
        &mut self,
        room_id: &str,
        player_id: Uuid,
        player_name: &str,
    ) -> Result<&Room, RoomError> {
        let room = self.rooms.get_mut(room_id).ok_or_else(|| RoomError::RoomNotFound {
            room_id: room_id.to_string(),
        })?;

        room.players.push(Player {
            id: player_id,
            name: player_name.to_string(),
            is_host: false,
        });

        Ok(room)
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Records a stats report, replacing any earlier report for the same
    /// user, and returns the room's full current list.
    pub fn upsert_stats(&mut self, room_id: &str, stats: PlayerStats) -> &[PlayerStats] {
        let entries = self.stats.entry(room_id.to_string()).or_default();
        entries.retain(|s| s.user_id != stats.user_id);
        entries.push(stats);
        entries.as_slice()
    }

    pub fn stats(&self, room_id: &str) -> Option<&[PlayerStats]> {
        self.stats.get(room_id).map(|entries| entries.as_slice())
    }

    /// Removes `player_id` from `room_id`, deleting the room when its host
    /// leaves or when the last member leaves. Returns `None` when the room
    /// or the player is unknown (e.g. the room was already torn down).
    pub fn remove_player(&mut self, room_id: &str, player_id: Uuid) -> Option<Departure> {
        let room = self.rooms.get_mut(room_id)?;
        let index = room.players.iter().position(|p| p.id == player_id)?;
        let departed = room.players.remove(index);

        if departed.is_host {
            let room = self.rooms.remove(room_id)?;
            self.stats.remove(room_id);
            info!("Room {} closed, host left", room_id);
            return Some(Departure::HostLeft {
                room_id: room.id,
                players: room.players,
            });
        }

        if room.players.is_empty() {
            self.rooms.remove(room_id);
            self.stats.remove(room_id);
            info!("Room {} deleted, empty", room_id);
            return Some(Departure::RoomEmptied {
                room_id: room_id.to_string(),
            });
        }

        Some(Departure::PlayerLeft {
            room_id: room_id.to_string(),
            players: room.players.clone(),
        })
    }
}
