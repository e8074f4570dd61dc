#![cfg(feature = "inmem-store")]

use std::sync::Arc;

use actix_web::{test, web, App};
use reportal::auth::{create_jwt, Role};
use reportal::events::SettingsFeed;
use reportal::rate_limit::{InMemoryRateLimiter, RateLimitConfig, RateLimiterFacade};
use reportal::repo::inmem::InMemRepo;
use reportal::storage::FsFileStore;
use reportal::{config, AppState};
use serde_json::{json, Value};

fn setup_env() -> tempfile::TempDir {
    std::env::set_var("JWT_SECRET", "test-secret-must-be-32-bytes-long!!");
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("DATA_DIR", dir.path());
    dir
}

fn test_state(dir: &tempfile::TempDir) -> AppState {
    AppState {
        repo: Arc::new(InMemRepo::new()),
        file_store: Arc::new(FsFileStore::new(dir.path().join("files"))),
        feed: Arc::new(SettingsFeed::new()),
        limiter: RateLimiterFacade::new(InMemoryRateLimiter::new(false), RateLimitConfig::from_env()),
    }
}

fn admin_token() -> String {
    create_jwt("1", "admin@example.com", vec![Role::User, Role::Admin]).unwrap()
}

fn item(title: &str) -> Value {
    json!({
        "title": title,
        "image_url": format!("https://cdn.example.com/{}.webp", title.to_lowercase().replace(' ', "-")),
        "year": 2024
    })
}

#[actix_web::test]
#[serial_test::serial]
async fn title_probe_numbers_collisions_without_writing() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    // occupy "Report" and "Report 1"
    for title in ["Report", "Report 1"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/infographics")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(item(title))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/title-probe")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"titles": ["Report", "Fresh name"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let probe: Value = test::read_body_json(resp).await;
    assert_eq!(probe["titles"][0], "Report 2");
    assert_eq!(probe["titles"][1], "Fresh name");

    // a probe is advisory: nothing was stored
    let req = test::TestRequest::get().uri("/api/v1/infographics").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[actix_web::test]
#[serial_test::serial]
async fn title_probe_counts_duplicates_inside_the_batch() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/title-probe")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())))
        .set_json(json!({"titles": ["Q1", "Q1", "Q1"]}))
        .to_request();
    let probe: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(probe["titles"], json!(["Q1", "Q1 1", "Q1 2"]));
}

#[actix_web::test]
#[serial_test::serial]
async fn bulk_insert_renames_collisions_and_keeps_order() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(item("Market share"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"items": [item("Market share"), item("Headcount"), item("Market share")]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let rows: Value = test::read_body_json(resp).await;
    let titles: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Market share 1", "Headcount", "Market share 2"]);

    // all four visible publicly afterwards
    let req = test::TestRequest::get().uri("/api/v1/infographics").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 4);
}

#[actix_web::test]
#[serial_test::serial]
async fn bulk_rejects_empty_and_oversized_batches() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"items": []}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let oversized: Vec<Value> = (0..51).map(|i| item(&format!("Chart {i}"))).collect();
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"items": oversized}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("50"));

    // one invalid row poisons the whole batch; nothing is written
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/infographics/bulk")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"items": [item("Good"), {"title": "", "image_url": "https://cdn.example.com/x.webp", "year": 2024}]}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::get().uri("/api/v1/infographics").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
#[serial_test::serial]
async fn probe_rejects_blank_titles() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    for titles in [json!([]), json!(["  "])] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/infographics/title-probe")
            .insert_header(("Authorization", format!("Bearer {}", admin_token())))
            .set_json(json!({"titles": titles}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
