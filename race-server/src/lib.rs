use std::sync::Arc;
use std::time::Duration;
use warp::Filter;

use crate::room_manager::RoomManager;
use crate::text_provider::TextProvider;
use crate::websocket::ConnectionManager;

pub mod config;
pub mod room_manager;
pub mod text_provider;
pub mod websocket;

pub fn create_routes(
    connection_manager: Arc<ConnectionManager>,
    room_manager: Arc<RoomManager>,
    text_provider: Arc<TextProvider>,
    set_text_delay: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let connection_manager_filter = warp::any().map({
        let connection_manager = connection_manager.clone();
        move || connection_manager.clone()
    });

    let room_manager_filter = warp::any().map({
        let room_manager = room_manager.clone();
        move || room_manager.clone()
    });

    let text_provider_filter = warp::any().map({
        let text_provider = text_provider.clone();
        move || text_provider.clone()
    });

    let delay_filter = warp::any().map(move || set_text_delay);

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(connection_manager_filter)
        .and(room_manager_filter)
        .and(text_provider_filter)
        .and(delay_filter)
        .map(|ws: warp::ws::Ws, conn_mgr, room_mgr, text, delay| {
            ws.on_upgrade(move |socket| {
                websocket::handle_connection(socket, conn_mgr, room_mgr, text, delay)
            })
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    websocket.or(health).with(cors).with(warp::log("race_server"))
}
