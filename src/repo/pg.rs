use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{RepoError, RepoResult};
use super::{
    ContentRepo, FaqRepo, InfographicRepo, InquiryRepo, SectionRepo, SettingsRepo, ShowcaseRepo,
    StatisticRepo, UserRepo,
};
use crate::listing;
use crate::models::*;

#[derive(Clone)]
pub struct PgRepo { pool: Pool<Postgres> }

impl PgRepo {
    pub fn new(pool: Pool<Postgres>) -> Self { Self { pool } }
}

fn db_err(e: sqlx::Error) -> RepoError {
    match e {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Conflict,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => RepoError::NotFound,
        other => RepoError::Internal(other.to_string()),
    }
}

#[async_trait]
impl SectionRepo for PgRepo {
    async fn list_hero_slides(&self) -> RepoResult<Vec<HeroSlide>> {
        sqlx::query_as::<_, HeroSlide>(
            "SELECT id, title, subtitle, image_url, cta_label, cta_url, display_order, created_at, updated_at, created_by \
             FROM hero_slides ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_hero_slide(&self, new: NewHeroSlide, actor: Option<String>) -> RepoResult<HeroSlide> {
        sqlx::query_as::<_, HeroSlide>(
            "INSERT INTO hero_slides (title, subtitle, image_url, cta_label, cta_url, display_order, created_by) \
             VALUES ($1,$2,$3,$4,$5, COALESCE($6, (SELECT COUNT(*) FROM hero_slides)::int), $7) \
             RETURNING id, title, subtitle, image_url, cta_label, cta_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.title).bind(&new.subtitle).bind(&new.image_url)
        .bind(&new.cta_label).bind(&new.cta_url).bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_hero_slide(&self, id: Id, upd: NewHeroSlide) -> RepoResult<HeroSlide> {
        sqlx::query_as::<_, HeroSlide>(
            "UPDATE hero_slides SET title=$2, subtitle=$3, image_url=$4, cta_label=$5, cta_url=$6, \
             display_order=COALESCE($7, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, title, subtitle, image_url, cta_label, cta_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.subtitle).bind(&upd.image_url)
        .bind(&upd.cta_label).bind(&upd.cta_url).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_hero_slide(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM hero_slides WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_experience_items(&self) -> RepoResult<Vec<ExperienceItem>> {
        sqlx::query_as::<_, ExperienceItem>(
            "SELECT id, title, description, icon_url, display_order, created_at, updated_at, created_by \
             FROM experience_items ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_experience_item(&self, new: NewExperienceItem, actor: Option<String>) -> RepoResult<ExperienceItem> {
        sqlx::query_as::<_, ExperienceItem>(
            "INSERT INTO experience_items (title, description, icon_url, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM experience_items)::int), $5) \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.title).bind(&new.description).bind(&new.icon_url)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_experience_item(&self, id: Id, upd: NewExperienceItem) -> RepoResult<ExperienceItem> {
        sqlx::query_as::<_, ExperienceItem>(
            "UPDATE experience_items SET title=$2, description=$3, icon_url=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.description).bind(&upd.icon_url).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_experience_item(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM experience_items WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_advantages(&self) -> RepoResult<Vec<Advantage>> {
        sqlx::query_as::<_, Advantage>(
            "SELECT id, title, description, icon_url, display_order, created_at, updated_at, created_by \
             FROM advantages ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_advantage(&self, new: NewAdvantage, actor: Option<String>) -> RepoResult<Advantage> {
        sqlx::query_as::<_, Advantage>(
            "INSERT INTO advantages (title, description, icon_url, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM advantages)::int), $5) \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.title).bind(&new.description).bind(&new.icon_url)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_advantage(&self, id: Id, upd: NewAdvantage) -> RepoResult<Advantage> {
        sqlx::query_as::<_, Advantage>(
            "UPDATE advantages SET title=$2, description=$3, icon_url=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.description).bind(&upd.icon_url).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_advantage(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM advantages WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_company_values(&self) -> RepoResult<Vec<CompanyValue>> {
        sqlx::query_as::<_, CompanyValue>(
            "SELECT id, title, description, icon_url, display_order, created_at, updated_at, created_by \
             FROM company_values ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_company_value(&self, new: NewCompanyValue, actor: Option<String>) -> RepoResult<CompanyValue> {
        sqlx::query_as::<_, CompanyValue>(
            "INSERT INTO company_values (title, description, icon_url, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM company_values)::int), $5) \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.title).bind(&new.description).bind(&new.icon_url)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_company_value(&self, id: Id, upd: NewCompanyValue) -> RepoResult<CompanyValue> {
        sqlx::query_as::<_, CompanyValue>(
            "UPDATE company_values SET title=$2, description=$3, icon_url=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, title, description, icon_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.description).bind(&upd.icon_url).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_company_value(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM company_values WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}

#[async_trait]
impl ShowcaseRepo for PgRepo {
    async fn list_testimonials(&self) -> RepoResult<Vec<Testimonial>> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, author, company, quote, avatar_url, display_order, created_at, updated_at, created_by \
             FROM testimonials ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_testimonial(&self, new: NewTestimonial, actor: Option<String>) -> RepoResult<Testimonial> {
        sqlx::query_as::<_, Testimonial>(
            "INSERT INTO testimonials (author, company, quote, avatar_url, display_order, created_by) \
             VALUES ($1,$2,$3,$4, COALESCE($5, (SELECT COUNT(*) FROM testimonials)::int), $6) \
             RETURNING id, author, company, quote, avatar_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.author).bind(&new.company).bind(&new.quote).bind(&new.avatar_url)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_testimonial(&self, id: Id, upd: NewTestimonial) -> RepoResult<Testimonial> {
        sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET author=$2, company=$3, quote=$4, avatar_url=$5, \
             display_order=COALESCE($6, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, author, company, quote, avatar_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.author).bind(&upd.company).bind(&upd.quote).bind(&upd.avatar_url)
        .bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_testimonial(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM testimonials WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_client_logos(&self) -> RepoResult<Vec<ClientLogo>> {
        sqlx::query_as::<_, ClientLogo>(
            "SELECT id, name, logo_url, website_url, display_order, created_at, updated_at, created_by \
             FROM client_logos ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_client_logo(&self, new: NewClientLogo, actor: Option<String>) -> RepoResult<ClientLogo> {
        sqlx::query_as::<_, ClientLogo>(
            "INSERT INTO client_logos (name, logo_url, website_url, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM client_logos)::int), $5) \
             RETURNING id, name, logo_url, website_url, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.name).bind(&new.logo_url).bind(&new.website_url)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_client_logo(&self, id: Id, upd: NewClientLogo) -> RepoResult<ClientLogo> {
        sqlx::query_as::<_, ClientLogo>(
            "UPDATE client_logos SET name=$2, logo_url=$3, website_url=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, name, logo_url, website_url, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.name).bind(&upd.logo_url).bind(&upd.website_url).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_client_logo(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM client_logos WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_timeline_entries(&self) -> RepoResult<Vec<TimelineEntry>> {
        sqlx::query_as::<_, TimelineEntry>(
            "SELECT id, year, title, description, display_order, created_at, updated_at, created_by \
             FROM timeline_entries ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_timeline_entry(&self, new: NewTimelineEntry, actor: Option<String>) -> RepoResult<TimelineEntry> {
        sqlx::query_as::<_, TimelineEntry>(
            "INSERT INTO timeline_entries (year, title, description, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM timeline_entries)::int), $5) \
             RETURNING id, year, title, description, display_order, created_at, updated_at, created_by",
        )
        .bind(new.year).bind(&new.title).bind(&new.description)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_timeline_entry(&self, id: Id, upd: NewTimelineEntry) -> RepoResult<TimelineEntry> {
        sqlx::query_as::<_, TimelineEntry>(
            "UPDATE timeline_entries SET year=$2, title=$3, description=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, year, title, description, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(upd.year).bind(&upd.title).bind(&upd.description).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_timeline_entry(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM timeline_entries WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}

const STATISTIC_SELECT: &str =
    "SELECT s.id, s.title, s.value, s.category_id, c.name AS category_name, s.display_order, \
     s.created_at, s.updated_at, s.created_by \
     FROM statistics s LEFT JOIN categories c ON c.id = s.category_id";

#[async_trait]
impl StatisticRepo for PgRepo {
    async fn list_statistics(&self) -> RepoResult<Vec<Statistic>> {
        sqlx::query_as::<_, Statistic>(
            &format!("{STATISTIC_SELECT} ORDER BY s.display_order, s.id"),
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_statistic(&self, new: NewStatistic, actor: Option<String>) -> RepoResult<Statistic> {
        let id = sqlx::query_scalar::<_, Id>(
            "INSERT INTO statistics (title, value, category_id, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM statistics)::int), $5) \
             RETURNING id",
        )
        .bind(&new.title).bind(&new.value).bind(new.category_id)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)?;
        // Re-select to embed the category name
        sqlx::query_as::<_, Statistic>(&format!("{STATISTIC_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_statistic(&self, id: Id, upd: NewStatistic) -> RepoResult<Statistic> {
        sqlx::query_scalar::<_, Id>(
            "UPDATE statistics SET title=$2, value=$3, category_id=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.value).bind(upd.category_id).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)?;
        sqlx::query_as::<_, Statistic>(&format!("{STATISTIC_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_statistic(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM statistics WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}

#[async_trait]
impl InfographicRepo for PgRepo {
    async fn list_infographics(&self) -> RepoResult<Vec<Infographic>> {
        sqlx::query_as::<_, Infographic>(
            "SELECT id, title, image_url, year, display_order, created_at, updated_at, created_by \
             FROM infographics ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_infographic(&self, new: NewInfographic, actor: Option<String>) -> RepoResult<Infographic> {
        sqlx::query_as::<_, Infographic>(
            "INSERT INTO infographics (title, image_url, year, display_order, created_by) \
             VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM infographics)::int), $5) \
             RETURNING id, title, image_url, year, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.title).bind(&new.image_url).bind(new.year)
        .bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_infographic(&self, id: Id, upd: NewInfographic) -> RepoResult<Infographic> {
        sqlx::query_as::<_, Infographic>(
            "UPDATE infographics SET title=$2, image_url=$3, year=$4, \
             display_order=COALESCE($5, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, title, image_url, year, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.title).bind(&upd.image_url).bind(upd.year).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_infographic(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM infographics WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
    async fn infographic_titles(&self) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT title FROM infographics")
            .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_infographics_bulk(&self, new: Vec<NewInfographic>, actor: Option<String>) -> RepoResult<Vec<Infographic>> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut taken: Vec<String> = sqlx::query_scalar::<_, String>("SELECT title FROM infographics")
            .fetch_all(&mut *tx).await.map_err(db_err)?;
        let mut out = Vec::with_capacity(new.len());
        for item in new {
            let title = listing::next_available_title(taken.iter().map(|t| t.as_str()), &item.title);
            taken.push(title.clone());
            let row = sqlx::query_as::<_, Infographic>(
                "INSERT INTO infographics (title, image_url, year, display_order, created_by) \
                 VALUES ($1,$2,$3, COALESCE($4, (SELECT COUNT(*) FROM infographics)::int), $5) \
                 RETURNING id, title, image_url, year, display_order, created_at, updated_at, created_by",
            )
            .bind(&title).bind(&item.image_url).bind(item.year)
            .bind(item.display_order).bind(&actor)
            .fetch_one(&mut *tx).await.map_err(db_err)?;
            out.push(row);
        }
        tx.commit().await.map_err(db_err)?;
        Ok(out)
    }
}

const CONTENT_SELECT: &str =
    "SELECT i.id, i.content_type, i.year, i.title, i.cover_image_url, \
     i.pdf_url_en, i.pdf_url_ar, i.flipbook_url_en, i.flipbook_url_ar, i.youtube_url, \
     i.category_id, c.name AS category_name, i.created_at, i.updated_at, i.created_by \
     FROM content_items i LEFT JOIN categories c ON c.id = i.category_id";

#[async_trait]
impl ContentRepo for PgRepo {
    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, created_at FROM categories ORDER BY id")
            .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_category(&self, new: NewCategory) -> RepoResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&new.name)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_category(&self, id: Id, upd: NewCategory) -> RepoResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name=$2 WHERE id=$1 RETURNING id, name, created_at",
        )
        .bind(id).bind(&upd.name)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_category(&self, id: Id) -> RepoResult<()> {
        // Referencing rows go to NULL via their FK clauses
        let res = sqlx::query("DELETE FROM categories WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }

    async fn list_content_items(&self) -> RepoResult<Vec<ContentItem>> {
        sqlx::query_as::<_, ContentItem>(
            &format!("{CONTENT_SELECT} ORDER BY i.created_at DESC, i.id DESC"),
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_content_item(&self, new: NewContentItem, actor: Option<String>) -> RepoResult<ContentItem> {
        let id = sqlx::query_scalar::<_, Id>(
            "INSERT INTO content_items (content_type, year, title, cover_image_url, \
             pdf_url_en, pdf_url_ar, flipbook_url_en, flipbook_url_ar, youtube_url, category_id, created_by) \
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11) RETURNING id",
        )
        .bind(new.content_type).bind(new.year).bind(&new.title).bind(&new.cover_image_url)
        .bind(&new.pdf_url_en).bind(&new.pdf_url_ar)
        .bind(&new.flipbook_url_en).bind(&new.flipbook_url_ar)
        .bind(&new.youtube_url).bind(new.category_id).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)?;
        sqlx::query_as::<_, ContentItem>(&format!("{CONTENT_SELECT} WHERE i.id = $1"))
            .bind(id)
            .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_content_item(&self, id: Id, upd: NewContentItem) -> RepoResult<ContentItem> {
        sqlx::query_scalar::<_, Id>(
            "UPDATE content_items SET content_type=$2, year=$3, title=$4, cover_image_url=$5, \
             pdf_url_en=$6, pdf_url_ar=$7, flipbook_url_en=$8, flipbook_url_ar=$9, youtube_url=$10, \
             category_id=$11, updated_at=now() WHERE id=$1 RETURNING id",
        )
        .bind(id)
        .bind(upd.content_type).bind(upd.year).bind(&upd.title).bind(&upd.cover_image_url)
        .bind(&upd.pdf_url_en).bind(&upd.pdf_url_ar)
        .bind(&upd.flipbook_url_en).bind(&upd.flipbook_url_ar)
        .bind(&upd.youtube_url).bind(upd.category_id)
        .fetch_one(&self.pool).await.map_err(db_err)?;
        sqlx::query_as::<_, ContentItem>(&format!("{CONTENT_SELECT} WHERE i.id = $1"))
            .bind(id)
            .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_content_item(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM content_items WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}

#[async_trait]
impl FaqRepo for PgRepo {
    async fn list_faqs(&self) -> RepoResult<Vec<Faq>> {
        sqlx::query_as::<_, Faq>(
            "SELECT id, question, answer, display_order, created_at, updated_at, created_by \
             FROM faqs ORDER BY display_order, id",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn create_faq(&self, new: NewFaq, actor: Option<String>) -> RepoResult<Faq> {
        sqlx::query_as::<_, Faq>(
            "INSERT INTO faqs (question, answer, display_order, created_by) \
             VALUES ($1,$2, COALESCE($3, (SELECT COUNT(*) FROM faqs)::int), $4) \
             RETURNING id, question, answer, display_order, created_at, updated_at, created_by",
        )
        .bind(&new.question).bind(&new.answer).bind(new.display_order).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn update_faq(&self, id: Id, upd: NewFaq) -> RepoResult<Faq> {
        sqlx::query_as::<_, Faq>(
            "UPDATE faqs SET question=$2, answer=$3, \
             display_order=COALESCE($4, display_order), updated_at=now() WHERE id=$1 \
             RETURNING id, question, answer, display_order, created_at, updated_at, created_by",
        )
        .bind(id)
        .bind(&upd.question).bind(&upd.answer).bind(upd.display_order)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn delete_faq(&self, id: Id) -> RepoResult<()> {
        let res = sqlx::query("DELETE FROM faqs WHERE id=$1")
            .bind(id)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepo for PgRepo {
    async fn get_footer_settings(&self) -> RepoResult<FooterSettings> {
        // The migration seeds row 1, but reads must survive its absence
        let row = sqlx::query_as::<_, FooterSettings>(
            "SELECT id, about_text, email, phone, address, twitter_url, linkedin_url, \
             instagram_url, youtube_url, copyright_text, updated_at, updated_by \
             FROM footer_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool).await.map_err(db_err)?;
        Ok(row.unwrap_or_else(super::default_footer))
    }
    async fn upsert_footer_settings(&self, new: NewFooterSettings, actor: Option<String>) -> RepoResult<FooterSettings> {
        sqlx::query_as::<_, FooterSettings>(
            "INSERT INTO footer_settings (id, about_text, email, phone, address, twitter_url, \
             linkedin_url, instagram_url, youtube_url, copyright_text, updated_by) \
             VALUES (1, $1,$2,$3,$4,$5,$6,$7,$8,$9,$10) \
             ON CONFLICT (id) DO UPDATE SET about_text=EXCLUDED.about_text, email=EXCLUDED.email, \
             phone=EXCLUDED.phone, address=EXCLUDED.address, twitter_url=EXCLUDED.twitter_url, \
             linkedin_url=EXCLUDED.linkedin_url, instagram_url=EXCLUDED.instagram_url, \
             youtube_url=EXCLUDED.youtube_url, copyright_text=EXCLUDED.copyright_text, \
             updated_at=now(), updated_by=EXCLUDED.updated_by \
             RETURNING id, about_text, email, phone, address, twitter_url, linkedin_url, \
             instagram_url, youtube_url, copyright_text, updated_at, updated_by",
        )
        .bind(&new.about_text).bind(&new.email).bind(&new.phone).bind(&new.address)
        .bind(&new.twitter_url).bind(&new.linkedin_url).bind(&new.instagram_url)
        .bind(&new.youtube_url).bind(&new.copyright_text).bind(&actor)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
}

#[async_trait]
impl InquiryRepo for PgRepo {
    async fn create_inquiry(&self, new: NewInquiry) -> RepoResult<Inquiry> {
        let phone = listing::compose_phone(&new.country_code, &new.phone);
        sqlx::query_as::<_, Inquiry>(
            "INSERT INTO inquiries (name, company_name, email, phone, brief) \
             VALUES ($1,$2,$3,$4,$5) \
             RETURNING id, name, company_name, email, phone, brief, status, created_at",
        )
        .bind(&new.name).bind(&new.company_name).bind(&new.email).bind(&phone).bind(&new.brief)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn list_inquiries(&self) -> RepoResult<Vec<Inquiry>> {
        sqlx::query_as::<_, Inquiry>(
            "SELECT id, name, company_name, email, phone, brief, status, created_at \
             FROM inquiries ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool).await.map_err(db_err)
    }
    async fn set_inquiry_status(&self, id: Id, status: InquiryStatus) -> RepoResult<Inquiry> {
        sqlx::query_as::<_, Inquiry>(
            "UPDATE inquiries SET status=$2 WHERE id=$1 \
             RETURNING id, name, company_name, email, phone, brief, status, created_at",
        )
        .bind(id).bind(status)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
}

#[async_trait]
impl UserRepo for PgRepo {
    async fn find_user_by_email(&self, email: &str) -> RepoResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, is_admin, created_at \
             FROM admin_users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn get_user(&self, id: Uuid) -> RepoResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, password_hash, is_admin, created_at FROM admin_users WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn create_user(&self, email: String, password_hash: String, is_admin: bool) -> RepoResult<AdminUser> {
        sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, email, password_hash, is_admin) VALUES ($1,$2,$3,$4) \
             RETURNING id, email, password_hash, is_admin, created_at",
        )
        .bind(Uuid::new_v4()).bind(&email).bind(&password_hash).bind(is_admin)
        .fetch_one(&self.pool).await.map_err(db_err)
    }
    async fn set_password(&self, id: Uuid, password_hash: String) -> RepoResult<()> {
        let res = sqlx::query("UPDATE admin_users SET password_hash=$2 WHERE id=$1")
            .bind(id).bind(&password_hash)
            .execute(&self.pool).await.map_err(db_err)?;
        if res.rows_affected() == 0 { return Err(RepoError::NotFound); }
        Ok(())
    }
}
