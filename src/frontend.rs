//! Embedded page shells. The marketing site and the dashboard are SPAs; the
//! binary carries their built shells so a bare `cargo run` serves something
//! at every public route instead of depending on an external web server.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend/dist/"]
struct Asset;

/// Site routes rendered by the public shell. Anything else outside `/admin`
/// and the API gets the not-found shell.
pub const PUBLIC_PAGES: &[&str] = &[
    "/",
    "/reports",
    "/statistics",
    "/about",
    "/infographic",
    "/content",
    "/faq",
    "/privacy-policy",
];

fn content_type_for(path: &str) -> mime::Mime {
    match path.rsplit('.').next() {
        Some("html") => mime::TEXT_HTML_UTF_8,
        Some("css") => mime::TEXT_CSS,
        Some("js") => mime::APPLICATION_JAVASCRIPT,
        Some("json") => mime::APPLICATION_JSON,
        Some("svg") => mime::IMAGE_SVG,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

fn asset_response(path: &str, status: StatusCode) -> Option<HttpResponse> {
    Asset::get(path).map(|content| {
        HttpResponse::build(status)
            .content_type(content_type_for(path).as_ref())
            .body(content.data.into_owned())
    })
}

fn shell(name: &str, status: StatusCode) -> HttpResponse {
    asset_response(name, status)
        .unwrap_or_else(|| HttpResponse::NotFound().body("frontend bundle missing"))
}

/// Fallback handler for everything the API routes did not match.
pub async fn spa(req: HttpRequest) -> HttpResponse {
    let path = req.path();
    // Unknown API paths stay JSON, they never render a shell
    if path.starts_with("/api/") {
        return HttpResponse::NotFound().json(serde_json::json!({"error": "not found"}));
    }
    let trimmed = path.trim_start_matches('/');
    if !trimmed.is_empty() {
        if let Some(resp) = asset_response(trimmed, StatusCode::OK) {
            return resp;
        }
    }
    if path == "/admin" || path.starts_with("/admin/") {
        return shell("admin.html", StatusCode::OK);
    }
    if PUBLIC_PAGES.contains(&path) {
        return shell("index.html", StatusCode::OK);
    }
    shell("404.html", StatusCode::NOT_FOUND)
}
