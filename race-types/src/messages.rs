use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Player, PlayerStats};

/// Events a client sends over its socket. Encoded adjacently tagged as
/// `{"event": "...", "data": ...}` with kebab-case event names, matching the
/// frontend's wire protocol.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    CreateRoom(String),
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, player_name: String },
    StartGame(String),
    #[serde(rename_all = "camelCase")]
    PlayerProgress {
        room_id: String,
        user_id: String,
        progress: f64,
        name: String,
    },
    GameEndRequest(String),
    #[serde(rename_all = "camelCase")]
    PersonalStats { room_id: String, stats: PlayerStats },
}

/// Events the server pushes to clients, same encoding as [`ClientMessage`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    RoomCreated(String),
    PlayerList(Vec<Player>),
    StartGame(String),
    SetText(Vec<char>),
    #[serde(rename_all = "camelCase")]
    UpdateProgress {
        user_id: String,
        room_id: String,
        progress: f64,
        name: String,
    },
    GameEnded,
    PlayerStats(Vec<PlayerStats>),
    RoomClosed,
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_event_names() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"event":"create-room","data":"Alice"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::CreateRoom(name) if name == "Alice"));

        let msg: ClientMessage = serde_json::from_str(
            r#"{"event":"join-room","data":{"roomId":"AB12CD34","playerName":"Bob"}}"#,
        )
        .unwrap();
        assert!(matches!(
            msg,
            ClientMessage::JoinRoom { room_id, player_name }
                if room_id == "AB12CD34" && player_name == "Bob"
        ));
    }

    #[test]
    fn test_personal_stats_payload_is_relayed_verbatim() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"event":"personal-stats","data":{"roomId":"AB12CD34","stats":{"userId":"u1","wpm":50}}}"#,
        )
        .unwrap();

        match msg {
            ClientMessage::PersonalStats { room_id, stats } => {
                assert_eq!(room_id, "AB12CD34");
                assert_eq!(stats.user_id, "u1");
                assert_eq!(stats.metrics["wpm"], 50);
            }
            other => panic!("Expected PersonalStats, got {:?}", other),
        }
    }

    #[test]
    fn test_server_message_wire_format() {
        let json = serde_json::to_value(&ServerMessage::RoomCreated("AB12CD34".to_string())).unwrap();
        assert_eq!(json["event"], "room-created");
        assert_eq!(json["data"], "AB12CD34");

        let json = serde_json::to_value(&ServerMessage::GameEnded).unwrap();
        assert_eq!(json["event"], "game-ended");

        let json = serde_json::to_value(&ServerMessage::SetText(vec!['h', 'i'])).unwrap();
        assert_eq!(json["data"][0], "h");
        assert_eq!(json["data"][1], "i");
    }

    #[test]
    fn test_update_progress_field_names() {
        let message = ServerMessage::UpdateProgress {
            user_id: "u1".to_string(),
            room_id: "AB12CD34".to_string(),
            progress: 42.0,
            name: "Alice".to_string(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["event"], "update-progress");
        assert_eq!(json["data"]["userId"], "u1");
        assert_eq!(json["data"]["roomId"], "AB12CD34");
        assert_eq!(json["data"]["progress"], 42.0);
        assert_eq!(json["data"]["name"], "Alice");
    }
}
