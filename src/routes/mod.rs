use std::sync::Arc;

use actix_web::web;

use crate::events::SettingsFeed;
use crate::rate_limit::RateLimiterFacade;
use crate::repo::Repo;
use crate::storage::FileStore;

pub mod auth;
pub mod content;
pub mod figures;
pub mod inquiries;
pub mod sections;
pub mod showcase;
pub mod site;
pub mod uploads;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repo>,
    pub file_store: Arc<dyn FileStore>,
    pub feed: Arc<SettingsFeed>,
    pub limiter: RateLimiterFacade,
}

macro_rules! ensure_admin {
    ($auth:expr) => {
        if !$auth.0.roles.iter().any(|r| matches!(r, crate::auth::Role::Admin)) {
            return Err(crate::error::ApiError::Forbidden);
        }
    };
}
pub(crate) use ensure_admin;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // ---- public site reads ----
            .service(web::resource("/hero-slides").route(web::get().to(sections::list_hero_slides)))
            .service(web::resource("/experience").route(web::get().to(sections::list_experience)))
            .service(web::resource("/advantages").route(web::get().to(sections::list_advantages)))
            .service(web::resource("/values").route(web::get().to(sections::list_values)))
            .service(web::resource("/testimonials").route(web::get().to(showcase::list_testimonials)))
            .service(web::resource("/clients").route(web::get().to(showcase::list_clients)))
            .service(web::resource("/timeline").route(web::get().to(showcase::list_timeline)))
            .service(web::resource("/statistics").route(web::get().to(figures::list_statistics)))
            .service(web::resource("/infographics").route(web::get().to(figures::list_infographics)))
            .service(web::resource("/categories").route(web::get().to(content::list_categories)))
            .service(web::resource("/library").route(web::get().to(content::library)))
            .service(web::resource("/faqs").route(web::get().to(site::list_faqs)))
            .service(web::resource("/footer").route(web::get().to(site::get_footer)))
            .service(web::resource("/footer/events").route(web::get().to(site::footer_events)))
            .service(web::resource("/inquiries").route(web::post().to(inquiries::create_inquiry)))
            // ---- auth ----
            .service(web::resource("/auth/login").route(web::post().to(auth::login)))
            .service(web::resource("/auth/forgot-password").route(web::post().to(auth::forgot_password)))
            .service(web::resource("/auth/reset-password").route(web::post().to(auth::reset_password)))
            .service(web::resource("/auth/me").route(web::get().to(auth::me)))
            // ---- admin: home page sections ----
            .service(web::resource("/admin/hero-slides").route(web::post().to(sections::create_hero_slide)))
            .service(
                web::resource("/admin/hero-slides/{id}")
                    .route(web::put().to(sections::update_hero_slide))
                    .route(web::delete().to(sections::delete_hero_slide)),
            )
            .service(web::resource("/admin/experience").route(web::post().to(sections::create_experience)))
            .service(
                web::resource("/admin/experience/{id}")
                    .route(web::put().to(sections::update_experience))
                    .route(web::delete().to(sections::delete_experience)),
            )
            .service(web::resource("/admin/advantages").route(web::post().to(sections::create_advantage)))
            .service(
                web::resource("/admin/advantages/{id}")
                    .route(web::put().to(sections::update_advantage))
                    .route(web::delete().to(sections::delete_advantage)),
            )
            .service(web::resource("/admin/values").route(web::post().to(sections::create_value)))
            .service(
                web::resource("/admin/values/{id}")
                    .route(web::put().to(sections::update_value))
                    .route(web::delete().to(sections::delete_value)),
            )
            // ---- admin: social proof and history ----
            .service(web::resource("/admin/testimonials").route(web::post().to(showcase::create_testimonial)))
            .service(
                web::resource("/admin/testimonials/{id}")
                    .route(web::put().to(showcase::update_testimonial))
                    .route(web::delete().to(showcase::delete_testimonial)),
            )
            .service(web::resource("/admin/clients").route(web::post().to(showcase::create_client)))
            .service(
                web::resource("/admin/clients/{id}")
                    .route(web::put().to(showcase::update_client))
                    .route(web::delete().to(showcase::delete_client)),
            )
            .service(web::resource("/admin/timeline").route(web::post().to(showcase::create_timeline_entry)))
            .service(
                web::resource("/admin/timeline/{id}")
                    .route(web::put().to(showcase::update_timeline_entry))
                    .route(web::delete().to(showcase::delete_timeline_entry)),
            )
            // ---- admin: figures ----
            .service(web::resource("/admin/statistics").route(web::post().to(figures::create_statistic)))
            .service(
                web::resource("/admin/statistics/{id}")
                    .route(web::put().to(figures::update_statistic))
                    .route(web::delete().to(figures::delete_statistic)),
            )
            .service(web::resource("/admin/infographics").route(web::post().to(figures::create_infographic)))
            .service(web::resource("/admin/infographics/bulk").route(web::post().to(figures::bulk_create_infographics)))
            .service(web::resource("/admin/infographics/title-probe").route(web::post().to(figures::probe_titles)))
            .service(
                web::resource("/admin/infographics/{id}")
                    .route(web::put().to(figures::update_infographic))
                    .route(web::delete().to(figures::delete_infographic)),
            )
            // ---- admin: library ----
            .service(web::resource("/admin/categories").route(web::post().to(content::create_category)))
            .service(
                web::resource("/admin/categories/{id}")
                    .route(web::put().to(content::update_category))
                    .route(web::delete().to(content::delete_category)),
            )
            .service(
                web::resource("/admin/content")
                    .route(web::get().to(content::admin_list_content))
                    .route(web::post().to(content::create_content_item)),
            )
            .service(
                web::resource("/admin/content/{id}")
                    .route(web::put().to(content::update_content_item))
                    .route(web::delete().to(content::delete_content_item)),
            )
            // ---- admin: FAQ, footer, inquiries, uploads ----
            .service(web::resource("/admin/faqs").route(web::post().to(site::create_faq)))
            .service(
                web::resource("/admin/faqs/{id}")
                    .route(web::put().to(site::update_faq))
                    .route(web::delete().to(site::delete_faq)),
            )
            .service(web::resource("/admin/footer").route(web::put().to(site::update_footer)))
            .service(web::resource("/admin/inquiries").route(web::get().to(inquiries::list_inquiries)))
            .service(web::resource("/admin/inquiries/{id}").route(web::patch().to(inquiries::set_inquiry_status)))
            .service(web::resource("/admin/uploads").route(web::post().to(uploads::upload_file))),
    );
    // Public fetch routes live outside /api/v1 so plain <img src> / <a href>
    // markup works against them.
    cfg.route("/files/{key:.*}", web::get().to(uploads::get_file));
    cfg.route("/health", web::get().to(site::health));
}
