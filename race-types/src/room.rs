use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A participant in a room. `id` is the server-assigned connection id; it is
/// valid exactly as long as the underlying socket is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub is_host: bool,
}

/// One player's end-of-race report. Everything besides `user_id` (wpm,
/// accuracy, elapsed time, ...) is computed client-side and relayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub user_id: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub metrics: serde_json::Map<String, serde_json::Value>,
}
