// src/web/handlers/search_handlers.rs
use crate::core::{search_with_fallback, Dashboard};
use crate::types::ExperienceLevel;
use crate::web::types::{DataResponse, SearchParams, ServerState, StandardErrorResponse};

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

pub async fn search_jobs_handler(
    params: SearchParams,
    state: &State<ServerState>,
) -> Result<Json<DataResponse<Dashboard>>, (Status, Json<StandardErrorResponse>)> {
    let query = match params.query() {
        Ok(query) => query,
        Err(value) => {
            warn!("Rejected search with unknown experience level: {}", value);
            return Err((
                Status::BadRequest,
                Json(StandardErrorResponse::new(
                    format!("Unknown experience level: {}", value),
                    "INVALID_EXPERIENCE".to_string(),
                    ExperienceLevel::ALL
                        .iter()
                        .filter(|level| **level != ExperienceLevel::Any)
                        .map(|level| format!("Use experience={}", level.label()))
                        .collect(),
                )),
            ));
        }
    };

    info!("Dashboard search: '{}'", query.search_text());

    let outcome = search_with_fallback(&state.fetcher, &state.store, &query).await;
    let dashboard = Dashboard::build(outcome, params.filter(), params.top());

    let message = dashboard
        .notice
        .clone()
        .unwrap_or_else(|| dashboard.summary());

    Ok(Json(DataResponse::success(message, dashboard)))
}
