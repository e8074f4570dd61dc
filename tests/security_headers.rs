#![cfg(feature = "inmem-store")]

use std::sync::Arc;

use actix_web::{test, web, App, HttpResponse};
use reportal::events::SettingsFeed;
use reportal::rate_limit::{InMemoryRateLimiter, RateLimitConfig, RateLimiterFacade};
use reportal::repo::inmem::InMemRepo;
use reportal::storage::FsFileStore;
use reportal::{config, AppState, SecurityHeaders};

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

#[actix_web::test]
#[serial_test::serial]
async fn baseline_headers_are_present() {
    std::env::remove_var("ENABLE_HSTS");
    let _dir = setup_env();
    let state = test_state(&_dir);
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::from_env())
            .app_data(web::Data::new(state))
            .configure(config),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/hero-slides").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert!(headers.get("content-security-policy").is_some());
    assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("permissions-policy").is_some());
    // not enabled by default
    assert!(headers.get("strict-transport-security").is_none());
}

#[actix_web::test]
#[serial_test::serial]
async fn hsts_follows_env_and_builder_override() {
    let _dir = setup_env();

    // env alone turns it on
    std::env::set_var("ENABLE_HSTS", "1");
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::from_env())
            .app_data(web::Data::new(test_state(&_dir)))
            .configure(config),
    )
    .await;
    let req = test::TestRequest::get().uri("/api/v1/hero-slides").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("strict-transport-security").is_some());

    // builder wins over env
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::from_env().with_hsts(false))
            .app_data(web::Data::new(test_state(&_dir)))
            .configure(config),
    )
    .await;
    let req = test::TestRequest::get().uri("/api/v1/hero-slides").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("strict-transport-security").is_none());
    std::env::remove_var("ENABLE_HSTS");
}

#[actix_web::test]
#[serial_test::serial]
async fn handler_set_csp_is_left_alone() {
    let _dir = setup_env();
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::from_env())
            .app_data(web::Data::new(test_state(&_dir)))
            .route(
                "/custom",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .insert_header((
                            actix_web::http::header::CONTENT_SECURITY_POLICY,
                            "custom-src 'none'",
                        ))
                        .finish()
                }),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/custom").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let csp = resp.headers().get("content-security-policy").unwrap().to_str().unwrap();
    assert_eq!(csp, "custom-src 'none'");
}
