use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ApiErrorBody;
use crate::listing::{ContentPage, InquiryPage, SortDir};
use crate::models::{
    Advantage, Category, ClientLogo, CompanyValue, ContentItem, ContentType, ExperienceItem, Faq,
    FooterSettings, HeroSlide, Infographic, Inquiry, InquiryStatus, NewAdvantage, NewCategory,
    NewClientLogo, NewCompanyValue, NewContentItem, NewExperienceItem, NewFaq, NewFooterSettings,
    NewHeroSlide, NewInfographic, NewInquiry, NewStatistic, NewTestimonial, NewTimelineEntry,
    Statistic, Testimonial, TimelineEntry,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::sections::list_hero_slides,
        crate::routes::sections::create_hero_slide,
        crate::routes::sections::update_hero_slide,
        crate::routes::showcase::list_testimonials,
        crate::routes::figures::list_statistics,
        crate::routes::figures::bulk_create_infographics,
        crate::routes::figures::probe_titles,
        crate::routes::content::library,
        crate::routes::content::create_content_item,
        crate::routes::site::get_footer,
        crate::routes::inquiries::create_inquiry,
        crate::routes::inquiries::list_inquiries,
        crate::routes::uploads::upload_file,
        crate::routes::auth::login,
        crate::routes::auth::me,
    ),
    components(schemas(
        HeroSlide, NewHeroSlide, ExperienceItem, NewExperienceItem,
        Advantage, NewAdvantage, CompanyValue, NewCompanyValue,
        Testimonial, NewTestimonial, ClientLogo, NewClientLogo,
        TimelineEntry, NewTimelineEntry, Statistic, NewStatistic,
        Infographic, NewInfographic, Category, NewCategory,
        ContentItem, NewContentItem, ContentType,
        Faq, NewFaq, FooterSettings, NewFooterSettings,
        Inquiry, NewInquiry, InquiryStatus,
        SortDir, ContentPage, InquiryPage, ApiErrorBody,
        crate::routes::figures::BulkInfographics,
        crate::routes::figures::TitleProbeRequest,
        crate::routes::figures::TitleProbeResponse,
        crate::routes::inquiries::InquiryStatusUpdate,
        crate::routes::uploads::UploadOut,
        crate::routes::auth::LoginRequest,
        crate::routes::auth::LoginResponse,
        crate::routes::auth::SessionUser,
        crate::routes::auth::ForgotPasswordRequest,
        crate::routes::auth::ResetPasswordRequest,
        crate::routes::auth::MeResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "sections", description = "Home page section blocks"),
        (name = "library", description = "Reports, flipbooks and videos"),
        (name = "inquiries", description = "Contact form intake and review"),
        (name = "auth", description = "Dashboard sessions and password recovery"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
