use job_explorer::core::{ApiConfig, FallbackStore, JobFetcher};
use job_explorer::types::{JobRecord, JobTable, SkillSet};
use job_explorer::web::{build_rocket, ServerState};
use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::Value;
use tempfile::TempDir;

/// Server whose upstream refuses connections, so every search takes the fallback path
async fn client_with_saved_jobs(dir: &TempDir, saved: Option<JobTable>) -> Client {
    let store = FallbackStore::new(dir.path().join("fallback_jobs.csv"));
    if let Some(table) = saved {
        store.save(&table).await.unwrap();
    }

    let config = ApiConfig::new("http://127.0.0.1:9", "test-key").with_timeout(2);
    let state = ServerState {
        fetcher: JobFetcher::new(config).unwrap(),
        store,
    };

    Client::tracked(build_rocket(rocket::Config::figment(), state))
        .await
        .expect("valid rocket instance")
}

fn saved_table() -> JobTable {
    let record = |employer: &str, city: &str, skills: &[&str]| JobRecord {
        employer_name: employer.to_string(),
        job_title: "Data Analyst".to_string(),
        job_city: city.to_string(),
        job_country: Some("IN".to_string()),
        posted_on: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        skills: SkillSet::from_list(skills.iter().map(|s| s.to_string()).collect()),
        apply_link: format!("https://{}.example/apply", employer.to_lowercase()),
    };
    JobTable::new(vec![
        record("Acme", "Pune", &["Python", "SQL"]),
        record("Globex", "Mumbai", &["Excel"]),
        record("Initech", "Pune", &[]),
    ])
}

#[rocket::async_test]
async fn search_falls_back_to_saved_jobs() {
    let dir = TempDir::new().unwrap();
    let client = client_with_saved_jobs(&dir, Some(saved_table())).await;

    let response = client
        .get("/api/jobs/search?title=Data%20Analyst&location=India&city=pune")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "data");
    assert_eq!(body["data"]["source"]["kind"], "fallback");
    assert_eq!(body["data"]["total_jobs"], 3);
    assert_eq!(body["data"]["matching_jobs"], 2);
    assert_eq!(body["data"]["top_cities"][0]["value"], "Pune");
    assert_eq!(body["data"]["top_cities"][0]["count"], 2);
    assert_eq!(body["data"]["refinements"]["cities"][1], "Mumbai");
    assert!(body["message"].as_str().unwrap().starts_with("Job API error"));
}

#[rocket::async_test]
async fn search_without_saved_jobs_reports_no_data() {
    let dir = TempDir::new().unwrap();
    let client = client_with_saved_jobs(&dir, None).await;

    let response = client.get("/api/jobs/search?title=Analyst").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["data"]["source"]["kind"], "unavailable");
    assert_eq!(body["data"]["jobs"].as_array().unwrap().len(), 0);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .ends_with("No job data available."));
}

#[rocket::async_test]
async fn unknown_experience_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let client = client_with_saved_jobs(&dir, None).await;

    let response = client
        .get("/api/jobs/search?title=Analyst&experience=Wizard")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "INVALID_EXPERIENCE");
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 4);
}

#[rocket::async_test]
async fn health_and_unknown_routes() {
    let dir = TempDir::new().unwrap();
    let client = client_with_saved_jobs(&dir, None).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    assert_eq!(response.into_string().await.unwrap(), "\"OK\"");

    let response = client.get("/api/nothing-here").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["error_code"], "NOT_FOUND");
}
