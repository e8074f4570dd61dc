#![cfg(feature = "inmem-store")]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::{test, web, App};
use reportal::auth::{create_jwt, Role};
use reportal::events::SettingsFeed;
use reportal::rate_limit::{InMemoryRateLimiter, RateLimitConfig, RateLimiterFacade};
use reportal::repo::inmem::InMemRepo;
use reportal::storage::FsFileStore;
use reportal::{config, AppState};
use serde_json::{json, Value};

/// Point the snapshot store at a throwaway directory and install a known
/// signing secret. The returned guard must stay alive for the whole test.
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

fn user_token() -> String {
    create_jwt("2", "viewer@example.com", vec![Role::User]).unwrap()
}

#[actix_web::test]
#[serial_test::serial]
async fn health_endpoint_answers() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
#[serial_test::serial]
async fn admin_routes_reject_missing_and_non_admin_tokens() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    let payload = json!({
        "title": "Annual reports, reimagined",
        "subtitle": "Design-led reporting",
        "image_url": "https://cdn.example.com/hero.webp"
    });

    // no Authorization header
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/hero-slides")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // valid token, but not an admin
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/hero-slides")
        .insert_header(("Authorization", format!("Bearer {}", user_token())))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // garbage token
    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/hero-slides/1")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[serial_test::serial]
async fn hero_slide_crud_roundtrip() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    // create two slides; display_order is appended when omitted
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/hero-slides")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": "First",
            "subtitle": "Opening slide",
            "image_url": "https://cdn.example.com/a.webp",
            "cta_label": "Read more",
            "cta_url": "https://example.com/reports"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["title"], "First");
    assert_eq!(first["display_order"], 0);
    assert_eq!(first["created_by"], "admin@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/hero-slides")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": "Second",
            "subtitle": "Next slide",
            "image_url": "https://cdn.example.com/b.webp"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["display_order"], 1);

    // public list needs no token and comes back in display order
    let req = test::TestRequest::get().uri("/api/v1/hero-slides").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["title"], "First");

    // a full-replace update can move a slide to the back
    let id = first["id"].as_i64().unwrap();
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/hero-slides/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "title": "First, retitled",
            "subtitle": "Opening slide",
            "image_url": "https://cdn.example.com/a.webp",
            "display_order": 5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "First, retitled");
    assert_eq!(updated["display_order"], 5);

    let req = test::TestRequest::get().uri("/api/v1/hero-slides").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed[0]["title"], "Second");
    assert_eq!(listed[1]["title"], "First, retitled");

    // delete, then confirm the id is really gone
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/hero-slides/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/hero-slides/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
#[serial_test::serial]
async fn deleted_ids_are_never_reassigned() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    let create = |title: &str| {
        test::TestRequest::post()
            .uri("/api/v1/admin/advantages")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"title": title, "description": "d"}))
            .to_request()
    };

    let a: Value = test::read_body_json(test::call_service(&app, create("A")).await).await;
    let b: Value = test::read_body_json(test::call_service(&app, create("B")).await).await;
    let b_id = b["id"].as_i64().unwrap();
    assert!(b_id > a["id"].as_i64().unwrap());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/advantages/{b_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    // the freed id must not come back
    let c: Value = test::read_body_json(test::call_service(&app, create("C")).await).await;
    assert!(c["id"].as_i64().unwrap() > b_id);
}

#[actix_web::test]
#[serial_test::serial]
async fn showcase_entities_create_and_list() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/testimonials")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "author": "Fatima K.",
            "company": "Horizon Bank",
            "quote": "The annual report landed two weeks early."
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "name": "Horizon Bank",
            "logo_url": "https://cdn.example.com/logos/horizon.svg",
            "website_url": "https://horizon.example"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/timeline")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "year": 2019,
            "title": "First office",
            "description": "Opened in Dubai Design District."
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    for uri in ["/api/v1/testimonials", "/api/v1/clients", "/api/v1/timeline"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "GET {uri}");
        let listed: Value = test::read_body_json(resp).await;
        assert_eq!(listed.as_array().unwrap().len(), 1, "GET {uri}");
    }
}

#[actix_web::test]
#[serial_test::serial]
async fn faq_validation_rejects_blank_question() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/faqs")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())))
        .set_json(json!({"question": "", "answer": "Because."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation failed");
    assert!(body["fields"]["question"].is_array());
}

#[actix_web::test]
#[serial_test::serial]
async fn statistic_keeps_row_when_its_category_dies() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/categories")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"name": "Energy"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let category: Value = test::read_body_json(resp).await;
    let category_id = category["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/statistics")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "Installed capacity", "value": "14 GW", "category_id": category_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let stat: Value = test::read_body_json(resp).await;
    assert_eq!(stat["category_name"], "Energy");

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/statistics")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "Headcount", "value": "120"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    // category filter on the public list
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/statistics?category_id={category_id}"))
        .to_request();
    let filtered: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["title"], "Installed capacity");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/categories/{category_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    // both statistics survive, now uncategorised
    let req = test::TestRequest::get().uri("/api/v1/statistics").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
    for row in listed.as_array().unwrap() {
        assert!(row["category_id"].is_null());
        assert!(row["category_name"].is_null());
    }
}

#[actix_web::test]
#[serial_test::serial]
async fn category_names_are_not_deduplicated_by_the_store() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;
    let token = admin_token();

    // duplicates are a dashboard hygiene matter, both rows go in
    for name in ["Finance", "finance"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/categories")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"name": name}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201, "{name}");
    }

    let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let listed: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[actix_web::test]
#[serial_test::serial]
async fn footer_update_reaches_open_event_streams() {
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(App::new().app_data(web::Data::new(state)).configure(config)).await;

    // the seeded defaults answer before any admin write
    let req = test::TestRequest::get().uri("/api/v1/footer").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let footer: Value = test::read_body_json(resp).await;
    assert_eq!(footer["email"], "hello@example.com");

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/footer")
        .insert_header(("Authorization", format!("Bearer {}", admin_token())))
        .set_json(json!({
            "about_text": "Reports people actually read.",
            "email": "team@reportal.example",
            "phone": "+971 40000000",
            "address": "Dubai Design District",
            "linkedin_url": "https://linkedin.com/company/reportal",
            "copyright_text": "© Reportal."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/api/v1/footer").to_request();
    let footer: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(footer["email"], "team@reportal.example");
    assert_eq!(footer["updated_by"], "admin@example.com");

    // a fresh SSE subscriber gets the current row as its first frame
    let req = test::TestRequest::get().uri("/api/v1/footer/events").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("content-type").unwrap(), "text/event-stream");
    let mut body = std::pin::pin!(resp.into_body());
    let first = std::future::poll_fn(|cx| body.as_mut().poll_next(cx))
        .await
        .unwrap()
        .unwrap();
    let frame = String::from_utf8(first.to_vec()).unwrap();
    assert!(frame.starts_with("event: footer\ndata: "), "frame: {frame}");
    assert!(frame.contains("team@reportal.example"));
    assert!(frame.ends_with("\n\n"));
}
