use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Postgres bigserial compatible
pub type Id = i64;

/// Dialling-code prefix accepted by the public inquiry form ("+971", "+1", ...).
pub static COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{1,4}$").expect("country code regex"));

// ---------------------------------------------------------------------------
// Home page sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct HeroSlide {
    pub id: Id,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewHeroSlide {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub subtitle: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(length(max = 80))]
    pub cta_label: Option<String>,
    #[validate(url)]
    pub cta_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ExperienceItem {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewExperienceItem {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(url)]
    pub icon_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Advantage {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewAdvantage {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(url)]
    pub icon_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CompanyValue {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewCompanyValue {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(url)]
    pub icon_url: Option<String>,
    pub display_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Social proof and history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Testimonial {
    pub id: Id,
    pub author: String,
    pub company: String,
    pub quote: String,
    pub avatar_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewTestimonial {
    #[validate(length(min = 1, max = 120))]
    pub author: String,
    #[validate(length(min = 1, max = 120))]
    pub company: String,
    #[validate(length(min = 1, max = 2000))]
    pub quote: String,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ClientLogo {
    pub id: Id,
    pub name: String,
    pub logo_url: String,
    pub website_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewClientLogo {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(url)]
    pub logo_url: String,
    #[validate(url)]
    pub website_url: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct TimelineEntry {
    pub id: Id,
    pub year: i32,
    pub title: String,
    pub description: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewTimelineEntry {
    #[validate(range(min = 1990, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub display_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Figures: statistics and infographics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Statistic {
    pub id: Id,
    pub title: String,
    /// Display value as written ("500+", "97%"), not parsed server-side.
    pub value: String,
    pub category_id: Option<Id>,
    /// Embedded on reads; never written directly.
    #[sqlx(default)]
    pub category_name: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewStatistic {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 40))]
    pub value: String,
    pub category_id: Option<Id>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Infographic {
    pub id: Id,
    pub title: String,
    pub image_url: String,
    pub year: i32,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewInfographic {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(range(min = 1990, max = 2100))]
    pub year: i32,
    pub display_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Content library
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "content_type", rename_all = "lowercase")]
pub enum ContentType {
    Pdf,
    Flipbook,
    Youtube,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// A published document or video in the public library. Only the URL group
/// matching `content_type` is meaningful; an item whose own group is empty
/// is dropped from public reads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ContentItem {
    pub id: Id,
    pub content_type: ContentType,
    pub year: i32,
    pub title: String,
    pub cover_image_url: String,
    pub pdf_url_en: Option<String>,
    pub pdf_url_ar: Option<String>,
    pub flipbook_url_en: Option<String>,
    pub flipbook_url_ar: Option<String>,
    pub youtube_url: Option<String>,
    pub category_id: Option<Id>,
    #[sqlx(default)]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewContentItem {
    pub content_type: ContentType,
    #[validate(range(min = 1990, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(url)]
    pub cover_image_url: String,
    #[validate(url)]
    pub pdf_url_en: Option<String>,
    #[validate(url)]
    pub pdf_url_ar: Option<String>,
    #[validate(url)]
    pub flipbook_url_en: Option<String>,
    #[validate(url)]
    pub flipbook_url_ar: Option<String>,
    #[validate(url)]
    pub youtube_url: Option<String>,
    pub category_id: Option<Id>,
}

// ---------------------------------------------------------------------------
// Site chrome: FAQ and footer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Faq {
    pub id: Id,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewFaq {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    #[validate(length(min = 1, max = 4000))]
    pub answer: String,
    pub display_order: Option<i32>,
}

/// Singleton row backing the site footer. Admin writes replace it wholesale
/// and are pushed to subscribed clients over SSE.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct FooterSettings {
    pub id: Id,
    pub about_text: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub copyright_text: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewFooterSettings {
    #[validate(length(min = 1, max = 2000))]
    pub about_text: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 40))]
    pub phone: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(url)]
    pub twitter_url: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub instagram_url: Option<String>,
    #[validate(url)]
    pub youtube_url: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub copyright_text: String,
}

// ---------------------------------------------------------------------------
// Inquiries ("Book a Meeting")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "inquiry_status", rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Completed,
}

/// Visitor-submitted contact request. Created by the public form, mutated
/// only by the admin status toggle, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Inquiry {
    pub id: Id,
    pub name: String,
    pub company_name: String,
    pub email: String,
    /// Country code and number joined with a single space ("+971 501234567").
    pub phone: String,
    pub brief: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewInquiry {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub company_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *COUNTRY_CODE_RE, message = "expected a dialling code like +971"))]
    pub country_code: String,
    #[validate(length(min = 4, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 4000))]
    pub brief: String,
}

// ---------------------------------------------------------------------------
// Admin accounts
// ---------------------------------------------------------------------------

/// Dashboard account. Never serialized into HTTP responses (the password
/// hash lives here); auth routes build their own payloads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
