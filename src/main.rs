use actix_web::{web, App, HttpServer, middleware::Compress};
use actix_cors::Cors;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod error;
mod events;
mod listing;
mod models;
mod openapi;
mod rate_limit;
mod repo;
mod routes;
mod security;
mod storage;
#[cfg(feature = "embed-frontend")]
mod frontend;

#[cfg(feature = "inmem-store")]
use repo::inmem::InMemRepo;
use events::SettingsFeed;
use metrics_exporter_prometheus::PrometheusBuilder;
use openapi::ApiDoc;
use rate_limit::{InMemoryRateLimiter, RateLimitConfig, RateLimiterFacade};
use repo::{RepoError, UserRepo};
use routes::{config, AppState};
use security::SecurityHeaders;
use storage::build_file_store;
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env is honoured in debug builds only; release deployments configure
    // the environment directly (shell, systemd, Docker).
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    validate_env_vars();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Bootstrapping reportal server");

    // Startup summary; secrets stay out of the log
    info!("Frontend URL: {}",
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()));
    info!("Storage backend: {}",
        std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "fs".to_string()));

    #[cfg(all(feature = "inmem-store", not(feature = "postgres-store")))]
    let repo = InMemRepo::new();
    #[cfg(all(feature = "inmem-store", not(feature = "postgres-store")))]
    info!("Using in-memory repository backend");

    #[cfg(feature = "postgres-store")]
    let repo = {
        use sqlx::postgres::PgPoolOptions;
        let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres-store");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(&db_url)
            .expect("Failed to create Pg pool");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run database migrations");
        info!("Using Postgres repository backend");
        crate::repo::pg::PgRepo::new(pool)
    };

    bootstrap_admin(&repo).await;

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install metrics recorder");

    let openapi = ApiDoc::openapi();
    let file_store = build_file_store().await.expect("Failed to initialise file store");
    let feed = Arc::new(SettingsFeed::new());
    let limiter = RateLimiterFacade::new(
        InMemoryRateLimiter::new(rate_limit_enabled()),
        RateLimitConfig::from_env(),
    );
    info!("OpenAPI spec generated");

    let (host, port) = bind_addr();
    let server = HttpServer::new(move || {
        let cors = {
            let mut c = Cors::default()
                // Vite dev server defaults
                .allowed_origin("http://localhost:5173")
                .allowed_origin("http://127.0.0.1:5173")
                // nginx container in docker-compose
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allow_any_header()
                .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .supports_credentials()
                .max_age(3600);
            // The deployed origin is whatever FRONTEND_URL says
            if let Ok(front) = std::env::var("FRONTEND_URL") {
                c = c.allowed_origin(&front);
            }
            c
        };

        let mut app = App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(SecurityHeaders::from_env())
            .wrap(cors)
            .configure(config)
            .service(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi.clone()))
            .route("/metrics", web::get().to(routes::site::metrics));

        app = app
            .app_data(web::Data::new(AppState {
                repo: Arc::new(repo.clone()),
                file_store: file_store.clone(),
                feed: feed.clone(),
                limiter: limiter.clone(),
            }))
            .app_data(web::Data::new(metrics_handle.clone()));

        // Any path the API did not claim falls through to the embedded shells
        #[cfg(feature = "embed-frontend")]
        {
            app = app.default_service(web::get().to(frontend::spa));
        }

        app
    })
    .bind((host.as_str(), port))?;

    info!("Listening on http://{}:{}", host, port);

    server.run().await
}

fn bind_addr() -> (String, u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);
    (host, port)
}

fn rate_limit_enabled() -> bool {
    !matches!(
        std::env::var("RATE_LIMIT_ENABLED").as_deref(),
        Ok("0") | Ok("false")
    )
}

/// Create the dashboard admin from ADMIN_EMAIL plus either
/// ADMIN_PASSWORD_HASH (bcrypt, see `src/bin/hash-password.rs`) or a plain
/// ADMIN_PASSWORD, when it does not exist yet. Without these variables a
/// fresh deployment has no way in.
async fn bootstrap_admin<R: UserRepo>(repo: &R) {
    let email = match std::env::var("ADMIN_EMAIL") {
        Ok(e) if !e.is_empty() => e,
        _ => {
            info!("ADMIN_EMAIL not set; skipping admin bootstrap");
            return;
        }
    };
    match repo.find_user_by_email(&email).await {
        Ok(_) => info!("Bootstrap admin already present"),
        Err(RepoError::NotFound) => {
            let hash = match std::env::var("ADMIN_PASSWORD_HASH") {
                Ok(h) if !h.is_empty() => h,
                _ => {
                    let plain = match std::env::var("ADMIN_PASSWORD") {
                        Ok(p) if !p.is_empty() => p,
                        _ => {
                            info!("Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD set; skipping admin bootstrap");
                            return;
                        }
                    };
                    match auth::hash_password(plain).await {
                        Ok(h) => h,
                        Err(_) => {
                            error!("Failed to hash bootstrap admin password");
                            return;
                        }
                    }
                }
            };
            match repo.create_user(email.clone(), hash, true).await {
                Ok(_) => info!("Bootstrap admin {} created", email),
                Err(e) => error!("Failed to create bootstrap admin: {}", e),
            }
        }
        Err(e) => error!("Bootstrap admin lookup failed: {}", e),
    }
}

/// Configuration checks that abort before the server binds.
fn validate_env_vars() {
    use std::env;

    const REQUIRED: &[&str] = &["JWT_SECRET"];
    let missing: Vec<&str> = REQUIRED
        .iter()
        .copied()
        .filter(|var| env::var(var).is_err())
        .collect();
    if !missing.is_empty() {
        eprintln!("Missing required environment variables: {missing:?}");
        eprintln!("Copy .env.example to .env and fill it in");
        std::process::exit(1);
    }

    if env::var("JWT_SECRET").map(|s| s.len() < 32).unwrap_or(true) {
        eprintln!("JWT_SECRET must be at least 32 characters long");
        std::process::exit(1);
    }

    if env::var("ADMIN_EMAIL").is_err()
        || (env::var("ADMIN_PASSWORD").is_err() && env::var("ADMIN_PASSWORD_HASH").is_err())
    {
        eprintln!("Warning: admin bootstrap not configured (set ADMIN_EMAIL plus ADMIN_PASSWORD or ADMIN_PASSWORD_HASH)");
        eprintln!("An existing account store is required to sign in without them");
    }
}
