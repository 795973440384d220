// src/web/handlers/system_handlers.rs
use crate::web::types::ServerState;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(state: &State<ServerState>) -> Json<&'static str> {
    info!(
        "Health check (fallback file: {})",
        state.store.path().display()
    );
    Json("OK")
}
