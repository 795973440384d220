// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::{ConfigManager, Dashboard, FallbackStore, JobFetcher};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/jobs/search?<params..>")]
pub async fn search_jobs(
    params: SearchParams,
    state: &State<ServerState>,
) -> Result<Json<DataResponse<Dashboard>>, (Status, Json<StandardErrorResponse>)> {
    handlers::search_jobs_handler(params, state).await
}

#[get("/health")]
pub async fn health(state: &State<ServerState>) -> Json<&'static str> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Check the query string parameters".to_string()],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Unknown endpoint".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Use GET /api/jobs/search or GET /api/health".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Server with all routes mounted, not yet launched
pub fn build_rocket(figment: Figment, state: ServerState) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, not_found, internal_error])
        .mount("/api", routes![search_jobs, health, options])
}

pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    let state = ServerState {
        fetcher: JobFetcher::new(config.api)?,
        store: FallbackStore::new(config.storage.fallback_path),
    };

    info!("Starting job explorer API server");
    info!("Fallback file: {}", state.store.path().display());
    info!("Server: http://0.0.0.0:{}", port);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    build_rocket(figment, state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
