use job_explorer::core::aggregator::{top_n, Field};
use job_explorer::core::{search_with_fallback, Dashboard, DataSource, FallbackStore, JobSource};
use job_explorer::types::{JobFilter, Query};
use job_explorer::FetchError;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Mutex;
use tempfile::TempDir;

/// Stands in for the remote API
struct FakeSource {
    response: Result<Vec<Value>, u16>,
    seen_queries: Mutex<Vec<String>>,
}

impl FakeSource {
    fn returning(values: Vec<Value>) -> Self {
        Self {
            response: Ok(values),
            seen_queries: Mutex::new(Vec::new()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            seen_queries: Mutex::new(Vec::new()),
        }
    }
}

impl JobSource for FakeSource {
    fn search(&self, query: &Query) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send {
        self.seen_queries.lock().unwrap().push(query.search_text());
        let result = match &self.response {
            Ok(values) => Ok(values.clone()),
            Err(status) => Err(FetchError::Status {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        };
        async move { result }
    }
}

fn analyst_fixture() -> Vec<Value> {
    vec![
        json!({
            "employer_name": "Acme Analytics",
            "job_title": "Data Analyst",
            "job_city": "Pune",
            "job_country": "IN",
            "job_posted_at_datetime_utc": "2024-05-01T09:00:00.000Z",
            "job_required_skills": "Python, SQL",
            "job_apply_link": "https://acme.example/1"
        }),
        json!({
            "employer_name": "Globex",
            "job_title": "Junior Data Analyst",
            "job_city": "Mumbai",
            "job_country": "IN",
            "job_posted_at_datetime_utc": "2024-05-02T09:00:00.000Z",
            "job_required_skills": ["Excel"],
            "job_apply_link": "https://globex.example/2"
        }),
        json!({
            "employer_name": "Initech",
            "job_title": "Data Analyst",
            "job_city": "Pune",
            "job_country": "IN",
            "job_posted_at_datetime_utc": "2024-05-01T15:30:00.000Z",
            "job_required_skills": "Python, SQL",
            "job_apply_link": "https://initech.example/3"
        }),
        json!({
            "employer_name": "Umbrella",
            "job_title": "BI Analyst",
            "job_city": null,
            "job_country": "IN",
            "job_posted_at_datetime_utc": "yesterday",
            "job_required_skills": null,
            "job_description": "<p>Build <b>Tableau</b> dashboards</p>",
            "job_apply_link": "https://umbrella.example/4"
        }),
        json!({
            "employer_name": "Hooli",
            "job_title": "Analyst",
            "job_city": "Bengaluru",
            "job_country": "IN",
            "job_required_skills": null,
            "job_apply_link": "https://hooli.example/5"
        }),
    ]
}

fn store_in(dir: &TempDir) -> FallbackStore {
    FallbackStore::new(dir.path().join("fallback_jobs.csv"))
}

#[tokio::test]
async fn live_search_ranks_cities_and_skills() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = FakeSource::returning(analyst_fixture());
    let query = Query::new("Data Analyst", "India");

    let outcome = search_with_fallback(&source, &store, &query).await;

    assert_eq!(outcome.source, DataSource::Live);
    assert_eq!(outcome.table.len(), 5);
    assert_eq!(
        source.seen_queries.lock().unwrap().as_slice(),
        ["Data Analyst India".to_string()]
    );

    let cities = top_n(&outcome.table, Field::City, 10);
    assert_eq!(cities[0], ("Pune".to_string(), 2));
    assert!(cities.contains(&("Not Specified".to_string(), 1)));

    let skills = top_n(&outcome.table, Field::Skills, 10);
    assert_eq!(
        skills,
        vec![
            ("Python".to_string(), 2),
            ("SQL".to_string(), 2),
            ("Excel".to_string(), 1),
            ("Tableau".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn live_results_replace_the_fallback_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = FakeSource::returning(analyst_fixture());

    let outcome = search_with_fallback(&source, &store, &Query::new("Data Analyst", "India")).await;

    assert_eq!(store.load().await.unwrap(), outcome.table);
}

#[tokio::test]
async fn empty_response_serves_previous_results() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let query = Query::new("Data Analyst", "India");

    let first = search_with_fallback(&FakeSource::returning(analyst_fixture()), &store, &query).await;
    let second = search_with_fallback(&FakeSource::returning(Vec::new()), &store, &query).await;

    assert!(matches!(second.source, DataSource::Fallback { .. }));
    assert_eq!(second.table, first.table);
    assert!(second.notice().unwrap().starts_with("No jobs found"));
    // the fallback copy is untouched by the empty answer
    assert_eq!(store.load().await.unwrap(), first.table);
}

#[tokio::test]
async fn remote_error_serves_previous_results() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let query = Query::new("Data Analyst", "India");

    search_with_fallback(&FakeSource::returning(analyst_fixture()), &store, &query).await;
    let outcome = search_with_fallback(&FakeSource::failing(503), &store, &query).await;

    assert!(matches!(outcome.source, DataSource::Fallback { .. }));
    assert_eq!(outcome.table.len(), 5);
    assert!(outcome.notice().unwrap().starts_with("Job API error"));
}

#[tokio::test]
async fn remote_error_without_fallback_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let outcome =
        search_with_fallback(&FakeSource::failing(500), &store, &Query::new("Analyst", "India")).await;

    assert!(matches!(outcome.source, DataSource::Unavailable { .. }));
    assert!(!outcome.has_data());
    assert!(outcome.notice().unwrap().ends_with("No job data available."));
}

#[tokio::test]
async fn unreadable_fallback_counts_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    tokio::fs::write(store.path(), [0xff, 0xfe, 0x00, 0xc3])
        .await
        .unwrap();

    let outcome =
        search_with_fallback(&FakeSource::failing(502), &store, &Query::new("Analyst", "India")).await;

    assert!(matches!(outcome.source, DataSource::Unavailable { .. }));
}

#[tokio::test]
async fn dashboard_filters_after_fetch() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let query = Query::new("Data Analyst", "India").with_skill("SQL");

    let outcome = search_with_fallback(&FakeSource::returning(analyst_fixture()), &store, &query).await;
    let filter = JobFilter {
        skill: Some("python".to_string()),
        title: Some("data analyst".to_string()),
        ..Default::default()
    };
    let dashboard = Dashboard::build(outcome, filter, 10);

    assert_eq!(dashboard.total_jobs, 5);
    assert_eq!(dashboard.matching_jobs, 2);
    assert_eq!(dashboard.refinements.cities, vec!["Pune", "Mumbai", "Not Specified", "Bengaluru"]);
    assert_eq!(dashboard.refinements.skills, vec!["Python", "SQL", "Excel", "Tableau"]);
    assert_eq!(dashboard.postings_over_time.len(), 1);
    assert_eq!(dashboard.postings_over_time[0].count, 2);
}
