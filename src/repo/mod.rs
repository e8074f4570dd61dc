use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::*;

#[cfg(feature = "inmem-store")]
pub mod inmem;
#[cfg(feature = "postgres-store")]
pub mod pg;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("not found")] NotFound,
    #[error("conflict")] Conflict,
    #[error("internal: {0}")] Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Home page section rows: hero slides, experience items, advantages and
/// company values. All four share the same ordered-CRUD shape.
#[async_trait]
pub trait SectionRepo: Send + Sync {
    async fn list_hero_slides(&self) -> RepoResult<Vec<HeroSlide>>;
    async fn create_hero_slide(&self, new: NewHeroSlide, actor: Option<String>) -> RepoResult<HeroSlide>;
    async fn update_hero_slide(&self, id: Id, upd: NewHeroSlide) -> RepoResult<HeroSlide>;
    async fn delete_hero_slide(&self, id: Id) -> RepoResult<()>;

    async fn list_experience_items(&self) -> RepoResult<Vec<ExperienceItem>>;
    async fn create_experience_item(&self, new: NewExperienceItem, actor: Option<String>) -> RepoResult<ExperienceItem>;
    async fn update_experience_item(&self, id: Id, upd: NewExperienceItem) -> RepoResult<ExperienceItem>;
    async fn delete_experience_item(&self, id: Id) -> RepoResult<()>;

    async fn list_advantages(&self) -> RepoResult<Vec<Advantage>>;
    async fn create_advantage(&self, new: NewAdvantage, actor: Option<String>) -> RepoResult<Advantage>;
    async fn update_advantage(&self, id: Id, upd: NewAdvantage) -> RepoResult<Advantage>;
    async fn delete_advantage(&self, id: Id) -> RepoResult<()>;

    async fn list_company_values(&self) -> RepoResult<Vec<CompanyValue>>;
    async fn create_company_value(&self, new: NewCompanyValue, actor: Option<String>) -> RepoResult<CompanyValue>;
    async fn update_company_value(&self, id: Id, upd: NewCompanyValue) -> RepoResult<CompanyValue>;
    async fn delete_company_value(&self, id: Id) -> RepoResult<()>;
}

/// Social proof and company history rows.
#[async_trait]
pub trait ShowcaseRepo: Send + Sync {
    async fn list_testimonials(&self) -> RepoResult<Vec<Testimonial>>;
    async fn create_testimonial(&self, new: NewTestimonial, actor: Option<String>) -> RepoResult<Testimonial>;
    async fn update_testimonial(&self, id: Id, upd: NewTestimonial) -> RepoResult<Testimonial>;
    async fn delete_testimonial(&self, id: Id) -> RepoResult<()>;

    async fn list_client_logos(&self) -> RepoResult<Vec<ClientLogo>>;
    async fn create_client_logo(&self, new: NewClientLogo, actor: Option<String>) -> RepoResult<ClientLogo>;
    async fn update_client_logo(&self, id: Id, upd: NewClientLogo) -> RepoResult<ClientLogo>;
    async fn delete_client_logo(&self, id: Id) -> RepoResult<()>;

    async fn list_timeline_entries(&self) -> RepoResult<Vec<TimelineEntry>>;
    async fn create_timeline_entry(&self, new: NewTimelineEntry, actor: Option<String>) -> RepoResult<TimelineEntry>;
    async fn update_timeline_entry(&self, id: Id, upd: NewTimelineEntry) -> RepoResult<TimelineEntry>;
    async fn delete_timeline_entry(&self, id: Id) -> RepoResult<()>;
}

/// Headline numbers. Reads embed the category name when one is linked.
#[async_trait]
pub trait StatisticRepo: Send + Sync {
    async fn list_statistics(&self) -> RepoResult<Vec<Statistic>>;
    async fn create_statistic(&self, new: NewStatistic, actor: Option<String>) -> RepoResult<Statistic>;
    async fn update_statistic(&self, id: Id, upd: NewStatistic) -> RepoResult<Statistic>;
    async fn delete_statistic(&self, id: Id) -> RepoResult<()>;
}

#[async_trait]
pub trait InfographicRepo: Send + Sync {
    async fn list_infographics(&self) -> RepoResult<Vec<Infographic>>;
    async fn create_infographic(&self, new: NewInfographic, actor: Option<String>) -> RepoResult<Infographic>;
    async fn update_infographic(&self, id: Id, upd: NewInfographic) -> RepoResult<Infographic>;
    async fn delete_infographic(&self, id: Id) -> RepoResult<()>;
    /// Current titles, for the advisory collision probe.
    async fn infographic_titles(&self) -> RepoResult<Vec<String>>;
    /// Insert a batch, renaming any title already in use ("Report" becomes
    /// "Report 2" and so on). Resolution happens inside the store so two
    /// racing batches cannot claim the same name.
    async fn create_infographics_bulk(&self, new: Vec<NewInfographic>, actor: Option<String>) -> RepoResult<Vec<Infographic>>;
}

/// Library categories and content entries.
#[async_trait]
pub trait ContentRepo: Send + Sync {
    async fn list_categories(&self) -> RepoResult<Vec<Category>>;
    async fn create_category(&self, new: NewCategory) -> RepoResult<Category>;
    async fn update_category(&self, id: Id, upd: NewCategory) -> RepoResult<Category>;
    /// Deleting a category detaches its statistics and content items
    /// (category becomes unset) rather than cascading.
    async fn delete_category(&self, id: Id) -> RepoResult<()>;

    /// Every item, visible or not; the public listing filters on top.
    async fn list_content_items(&self) -> RepoResult<Vec<ContentItem>>;
    async fn create_content_item(&self, new: NewContentItem, actor: Option<String>) -> RepoResult<ContentItem>;
    async fn update_content_item(&self, id: Id, upd: NewContentItem) -> RepoResult<ContentItem>;
    async fn delete_content_item(&self, id: Id) -> RepoResult<()>;
}

#[async_trait]
pub trait FaqRepo: Send + Sync {
    async fn list_faqs(&self) -> RepoResult<Vec<Faq>>;
    async fn create_faq(&self, new: NewFaq, actor: Option<String>) -> RepoResult<Faq>;
    async fn update_faq(&self, id: Id, upd: NewFaq) -> RepoResult<Faq>;
    async fn delete_faq(&self, id: Id) -> RepoResult<()>;
}

/// The footer settings singleton.
#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn get_footer_settings(&self) -> RepoResult<FooterSettings>;
    async fn upsert_footer_settings(&self, new: NewFooterSettings, actor: Option<String>) -> RepoResult<FooterSettings>;
}

#[async_trait]
pub trait InquiryRepo: Send + Sync {
    async fn create_inquiry(&self, new: NewInquiry) -> RepoResult<Inquiry>;
    /// Newest first.
    async fn list_inquiries(&self) -> RepoResult<Vec<Inquiry>>;
    async fn set_inquiry_status(&self, id: Id, status: InquiryStatus) -> RepoResult<Inquiry>;
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> RepoResult<AdminUser>;
    async fn get_user(&self, id: Uuid) -> RepoResult<AdminUser>;
    async fn create_user(&self, email: String, password_hash: String, is_admin: bool) -> RepoResult<AdminUser>;
    async fn set_password(&self, id: Uuid, password_hash: String) -> RepoResult<()>;
}

pub trait Repo:
    SectionRepo
    + ShowcaseRepo
    + StatisticRepo
    + InfographicRepo
    + ContentRepo
    + FaqRepo
    + SettingsRepo
    + InquiryRepo
    + UserRepo
{
}

impl<T> Repo for T where
    T: SectionRepo
        + ShowcaseRepo
        + StatisticRepo
        + InfographicRepo
        + ContentRepo
        + FaqRepo
        + SettingsRepo
        + InquiryRepo
        + UserRepo
{
}

/// Placeholder footer served before an admin ever saves one. The Postgres
/// migration seeds the equivalent row.
pub fn default_footer() -> FooterSettings {
    FooterSettings {
        id: 1,
        about_text: "We turn complex corporate data into clear, compelling reports.".into(),
        email: "hello@example.com".into(),
        phone: "+971 40000000".into(),
        address: "Dubai, United Arab Emirates".into(),
        twitter_url: None,
        linkedin_url: None,
        instagram_url: None,
        youtube_url: None,
        copyright_text: "© Reportal. All rights reserved.".into(),
        updated_at: Utc::now(),
        updated_by: None,
    }
}
