use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::room_manager::RoomManager;
use crate::text_provider::TextProvider;
use crate::websocket::connection::{ConnectionId, ConnectionManager};
use race_core::Departure;
use race_types::{ClientMessage, PlayerStats, ServerMessage};

/// Per-connection event handler: the ingestion side of the session
/// coordinator. Registry mutations go through the [`RoomManager`];
/// broadcasts go through the [`ConnectionManager`].
#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    room_manager: Arc<RoomManager>,
    text_provider: Arc<TextProvider>,
    set_text_delay: Duration,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        room_manager: Arc<RoomManager>,
        text_provider: Arc<TextProvider>,
        set_text_delay: Duration,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            room_manager,
            text_provider,
            set_text_delay,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        // Update connection activity
        self.connection_manager
            .update_activity(self.connection_id)
            .await;

        match message {
            ClientMessage::CreateRoom(player_name) => self.handle_create_room(player_name).await,
            ClientMessage::JoinRoom {
                room_id,
                player_name,
            } => self.handle_join_room(room_id, player_name).await,
            ClientMessage::StartGame(room_id) => self.handle_start_game(room_id).await,
            ClientMessage::PlayerProgress {
                room_id,
                user_id,
                progress,
                name,
            } => {
                self.handle_player_progress(room_id, user_id, progress, name)
                    .await
            }
            ClientMessage::GameEndRequest(room_id) => self.handle_game_end_request(room_id).await,
            ClientMessage::PersonalStats { room_id, stats } => {
                self.handle_personal_stats(room_id, stats).await
            }
        }
    }

    async fn handle_create_room(&self, player_name: String) -> Result<(), String> {
        info!("Connection {} creating room", self.connection_id);

        let created = self
            .room_manager
            .create_room(self.connection_id, &player_name)
            .await;

        self.connection_manager
            .set_connection_room(self.connection_id, Some(created.room_id.clone()))
            .await;

        self.send_message(ServerMessage::RoomCreated(created.room_id.clone()))
            .await?;
        self.connection_manager
            .send_to_room(&created.room_id, ServerMessage::PlayerList(created.players))
            .await;

        Ok(())
    }

    async fn handle_join_room(&self, room_id: String, player_name: String) -> Result<(), String> {
        info!("Connection {} joining room {}", self.connection_id, room_id);

        match self
            .room_manager
            .join_room(&room_id, self.connection_id, &player_name)
            .await
        {
            Ok(players) => {
                self.connection_manager
                    .set_connection_room(self.connection_id, Some(room_id.clone()))
                    .await;
                self.connection_manager
                    .send_to_room(&room_id, ServerMessage::PlayerList(players))
                    .await;
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Connection {} failed to join room {}: {}",
                    self.connection_id, room_id, e
                );
                self.send_error(&e.to_string()).await
            }
        }
    }

    async fn handle_start_game(&self, room_id: String) -> Result<(), String> {
        info!(
            "Connection {} starting game in room {}",
            self.connection_id, room_id
        );

        let text = match self.text_provider.fetch_race_text().await {
            Ok(text) => text,
            Err(e) => {
                // Dropped on the floor: no broadcast, room stays in its
                // pre-start state.
                warn!("Dropping start-game for room {}: {}", room_id, e);
                return Ok(());
            }
        };

        self.connection_manager
            .send_to_room_except(
                &room_id,
                self.connection_id,
                ServerMessage::StartGame(room_id.clone()),
            )
            .await;

        // Give clients a moment to switch screens before the text lands.
        // The room can die while the timer runs; fire only if still live.
        let connection_manager = self.connection_manager.clone();
        let room_manager = self.room_manager.clone();
        let delay = self.set_text_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if room_manager.room_exists(&room_id).await {
                connection_manager
                    .send_to_room(&room_id, ServerMessage::SetText(text))
                    .await;
            }
        });

        Ok(())
    }

    async fn handle_player_progress(
        &self,
        room_id: String,
        user_id: String,
        progress: f64,
        name: String,
    ) -> Result<(), String> {
        // Transient relay; nothing is stored.
        let message = ServerMessage::UpdateProgress {
            user_id,
            room_id: room_id.clone(),
            progress,
            name,
        };
        self.connection_manager.send_to_room(&room_id, message).await;
        Ok(())
    }

    async fn handle_game_end_request(&self, room_id: String) -> Result<(), String> {
        self.connection_manager
            .send_to_room(&room_id, ServerMessage::GameEnded)
            .await;
        Ok(())
    }

    async fn handle_personal_stats(
        &self,
        room_id: String,
        stats: PlayerStats,
    ) -> Result<(), String> {
        info!(
            "Connection {} reported stats for room {}",
            self.connection_id, room_id
        );

        let all_stats = self.room_manager.record_stats(&room_id, stats).await;
        self.connection_manager
            .send_to_room(&room_id, ServerMessage::PlayerStats(all_stats))
            .await;

        Ok(())
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for connection {}", self.connection_id);

        match self.room_manager.handle_disconnect(self.connection_id).await {
            Some(Departure::HostLeft { room_id, .. }) => {
                // Tell the survivors first, then detach them from the dead
                // group so a reused code cannot reach them.
                self.connection_manager
                    .send_to_room(&room_id, ServerMessage::RoomClosed)
                    .await;
                for connection_id in self
                    .connection_manager
                    .get_connections_in_room(&room_id)
                    .await
                {
                    self.connection_manager
                        .set_connection_room(connection_id, None)
                        .await;
                }
            }
            Some(Departure::PlayerLeft { room_id, players }) => {
                self.connection_manager
                    .send_to_room(&room_id, ServerMessage::PlayerList(players))
                    .await;
            }
            Some(Departure::RoomEmptied { room_id }) => {
                // Nobody left to notify.
                info!("Room {} emptied by disconnect", room_id);
            }
            None => {
                // Connection was not in any room.
            }
        }
    }

    async fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
            .await
    }

    async fn send_error(&self, error_message: &str) -> Result<(), String> {
        self.send_message(ServerMessage::Error(error_message.to_string()))
            .await
    }
}
