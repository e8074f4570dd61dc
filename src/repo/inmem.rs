use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{default_footer, RepoError, RepoResult};
use super::{
    ContentRepo, FaqRepo, InfographicRepo, InquiryRepo, SectionRepo, SettingsRepo, ShowcaseRepo,
    StatisticRepo, UserRepo,
};
use crate::listing;
use crate::models::*;

#[derive(Default, Serialize, Deserialize)]
struct State {
    hero_slides: HashMap<Id, HeroSlide>,
    experience_items: HashMap<Id, ExperienceItem>,
    advantages: HashMap<Id, Advantage>,
    company_values: HashMap<Id, CompanyValue>,
    testimonials: HashMap<Id, Testimonial>,
    client_logos: HashMap<Id, ClientLogo>,
    timeline_entries: HashMap<Id, TimelineEntry>,
    statistics: HashMap<Id, Statistic>,
    infographics: HashMap<Id, Infographic>,
    categories: HashMap<Id, Category>,
    content_items: HashMap<Id, ContentItem>,
    faqs: HashMap<Id, Faq>,
    footer: Option<FooterSettings>,
    inquiries: HashMap<Id, Inquiry>,
    users: HashMap<Uuid, AdminUser>,
    next_id: Id,
}

/// Process-local store persisted as a JSON snapshot after every write.
/// Good for single-pod deployments and tests; the Postgres backend is the
/// production choice.
#[derive(Clone)]
pub struct InMemRepo {
    state: Arc<RwLock<State>>,
    snapshot_path: Arc<PathBuf>,
}

impl InMemRepo {
    fn data_dir() -> PathBuf {
        std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"))
    }

    fn load_state_from(path: &Path) -> State {
        match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice::<State>(&bytes) {
                Ok(s) => {
                    eprintln!("[inmem] Loaded snapshot '{}'", path.display());
                    s
                }
                Err(e) => {
                    eprintln!("[inmem] Failed to parse snapshot '{}': {e}. Starting empty.", path.display());
                    State::default()
                }
            },
            Err(e) => {
                eprintln!("[inmem] No snapshot at '{}': {e}. Starting empty.", path.display());
                State::default()
            }
        }
    }

    fn persist(&self) {
        let path = self.snapshot_path.clone();
        if let Ok(s) = serde_json::to_vec_pretty(&*self.state.read().unwrap()) {
            if let Some(dir) = path.parent() {
                let _ = std::fs::create_dir_all(dir);
            }
            if let Err(e) = std::fs::write(&*path, s) {
                eprintln!("[inmem] Failed to write snapshot '{}': {e}", path.display());
            }
        }
    }

    pub fn new() -> Self {
        let snapshot_path = Self::data_dir().join("state.json");
        let state = Self::load_state_from(&snapshot_path);
        Self {
            state: Arc::new(RwLock::new(state)),
            snapshot_path: Arc::new(snapshot_path),
        }
    }

    fn next_id(state: &mut State) -> Id {
        state.next_id += 1;
        state.next_id
    }

    /// Requested position, or append after the existing rows.
    fn order_or_append(requested: Option<i32>, existing: usize) -> i32 {
        requested.unwrap_or(existing as i32)
    }

    fn with_category_name(state: &State, mut stat: Statistic) -> Statistic {
        stat.category_name = stat
            .category_id
            .and_then(|cid| state.categories.get(&cid))
            .map(|c| c.name.clone());
        stat
    }

    fn item_with_category_name(state: &State, mut item: ContentItem) -> ContentItem {
        item.category_name = item
            .category_id
            .and_then(|cid| state.categories.get(&cid))
            .map(|c| c.name.clone());
        item
    }

    fn check_category(state: &State, category_id: Option<Id>) -> RepoResult<()> {
        if let Some(cid) = category_id {
            if !state.categories.contains_key(&cid) {
                return Err(RepoError::NotFound);
            }
        }
        Ok(())
    }
}

impl Default for InMemRepo {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl SectionRepo for InMemRepo {
    async fn list_hero_slides(&self) -> RepoResult<Vec<HeroSlide>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.hero_slides.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_hero_slide(&self, new: NewHeroSlide, actor: Option<String>) -> RepoResult<HeroSlide> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = HeroSlide {
            id,
            title: new.title,
            subtitle: new.subtitle,
            image_url: new.image_url,
            cta_label: new.cta_label,
            cta_url: new.cta_url,
            display_order: Self::order_or_append(new.display_order, s.hero_slides.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.hero_slides.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_hero_slide(&self, id: Id, upd: NewHeroSlide) -> RepoResult<HeroSlide> {
        let mut s = self.state.write().unwrap();
        let row = s.hero_slides.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.subtitle = upd.subtitle;
        row.image_url = upd.image_url;
        row.cta_label = upd.cta_label;
        row.cta_url = upd.cta_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_hero_slide(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.hero_slides.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_experience_items(&self) -> RepoResult<Vec<ExperienceItem>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.experience_items.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_experience_item(&self, new: NewExperienceItem, actor: Option<String>) -> RepoResult<ExperienceItem> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = ExperienceItem {
            id,
            title: new.title,
            description: new.description,
            icon_url: new.icon_url,
            display_order: Self::order_or_append(new.display_order, s.experience_items.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.experience_items.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_experience_item(&self, id: Id, upd: NewExperienceItem) -> RepoResult<ExperienceItem> {
        let mut s = self.state.write().unwrap();
        let row = s.experience_items.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.description = upd.description;
        row.icon_url = upd.icon_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_experience_item(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.experience_items.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_advantages(&self) -> RepoResult<Vec<Advantage>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.advantages.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_advantage(&self, new: NewAdvantage, actor: Option<String>) -> RepoResult<Advantage> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = Advantage {
            id,
            title: new.title,
            description: new.description,
            icon_url: new.icon_url,
            display_order: Self::order_or_append(new.display_order, s.advantages.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.advantages.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_advantage(&self, id: Id, upd: NewAdvantage) -> RepoResult<Advantage> {
        let mut s = self.state.write().unwrap();
        let row = s.advantages.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.description = upd.description;
        row.icon_url = upd.icon_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_advantage(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.advantages.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_company_values(&self) -> RepoResult<Vec<CompanyValue>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.company_values.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_company_value(&self, new: NewCompanyValue, actor: Option<String>) -> RepoResult<CompanyValue> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = CompanyValue {
            id,
            title: new.title,
            description: new.description,
            icon_url: new.icon_url,
            display_order: Self::order_or_append(new.display_order, s.company_values.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.company_values.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_company_value(&self, id: Id, upd: NewCompanyValue) -> RepoResult<CompanyValue> {
        let mut s = self.state.write().unwrap();
        let row = s.company_values.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.description = upd.description;
        row.icon_url = upd.icon_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_company_value(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.company_values.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
}

#[async_trait]
impl ShowcaseRepo for InMemRepo {
    async fn list_testimonials(&self) -> RepoResult<Vec<Testimonial>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.testimonials.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_testimonial(&self, new: NewTestimonial, actor: Option<String>) -> RepoResult<Testimonial> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = Testimonial {
            id,
            author: new.author,
            company: new.company,
            quote: new.quote,
            avatar_url: new.avatar_url,
            display_order: Self::order_or_append(new.display_order, s.testimonials.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.testimonials.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_testimonial(&self, id: Id, upd: NewTestimonial) -> RepoResult<Testimonial> {
        let mut s = self.state.write().unwrap();
        let row = s.testimonials.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.author = upd.author;
        row.company = upd.company;
        row.quote = upd.quote;
        row.avatar_url = upd.avatar_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_testimonial(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.testimonials.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_client_logos(&self) -> RepoResult<Vec<ClientLogo>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.client_logos.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_client_logo(&self, new: NewClientLogo, actor: Option<String>) -> RepoResult<ClientLogo> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = ClientLogo {
            id,
            name: new.name,
            logo_url: new.logo_url,
            website_url: new.website_url,
            display_order: Self::order_or_append(new.display_order, s.client_logos.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.client_logos.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_client_logo(&self, id: Id, upd: NewClientLogo) -> RepoResult<ClientLogo> {
        let mut s = self.state.write().unwrap();
        let row = s.client_logos.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.name = upd.name;
        row.logo_url = upd.logo_url;
        row.website_url = upd.website_url;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_client_logo(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.client_logos.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_timeline_entries(&self) -> RepoResult<Vec<TimelineEntry>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.timeline_entries.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_timeline_entry(&self, new: NewTimelineEntry, actor: Option<String>) -> RepoResult<TimelineEntry> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = TimelineEntry {
            id,
            year: new.year,
            title: new.title,
            description: new.description,
            display_order: Self::order_or_append(new.display_order, s.timeline_entries.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.timeline_entries.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_timeline_entry(&self, id: Id, upd: NewTimelineEntry) -> RepoResult<TimelineEntry> {
        let mut s = self.state.write().unwrap();
        let row = s.timeline_entries.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.year = upd.year;
        row.title = upd.title;
        row.description = upd.description;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_timeline_entry(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.timeline_entries.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
}

#[async_trait]
impl StatisticRepo for InMemRepo {
    async fn list_statistics(&self) -> RepoResult<Vec<Statistic>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s
            .statistics
            .values()
            .cloned()
            .map(|st| Self::with_category_name(&s, st))
            .collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_statistic(&self, new: NewStatistic, actor: Option<String>) -> RepoResult<Statistic> {
        let mut s = self.state.write().unwrap();
        Self::check_category(&s, new.category_id)?;
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = Statistic {
            id,
            title: new.title,
            value: new.value,
            category_id: new.category_id,
            category_name: None,
            display_order: Self::order_or_append(new.display_order, s.statistics.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.statistics.insert(id, row.clone());
        let out = Self::with_category_name(&s, row);
        drop(s);
        self.persist();
        Ok(out)
    }
    async fn update_statistic(&self, id: Id, upd: NewStatistic) -> RepoResult<Statistic> {
        let mut s = self.state.write().unwrap();
        Self::check_category(&s, upd.category_id)?;
        let row = s.statistics.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.value = upd.value;
        row.category_id = upd.category_id;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        let out = Self::with_category_name(&s, updated);
        drop(s);
        self.persist();
        Ok(out)
    }
    async fn delete_statistic(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.statistics.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
}

#[async_trait]
impl InfographicRepo for InMemRepo {
    async fn list_infographics(&self) -> RepoResult<Vec<Infographic>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.infographics.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_infographic(&self, new: NewInfographic, actor: Option<String>) -> RepoResult<Infographic> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = Infographic {
            id,
            title: new.title,
            image_url: new.image_url,
            year: new.year,
            display_order: Self::order_or_append(new.display_order, s.infographics.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.infographics.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_infographic(&self, id: Id, upd: NewInfographic) -> RepoResult<Infographic> {
        let mut s = self.state.write().unwrap();
        let row = s.infographics.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.title = upd.title;
        row.image_url = upd.image_url;
        row.year = upd.year;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_infographic(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.infographics.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
    async fn infographic_titles(&self) -> RepoResult<Vec<String>> {
        let s = self.state.read().unwrap();
        Ok(s.infographics.values().map(|i| i.title.clone()).collect())
    }
    async fn create_infographics_bulk(&self, new: Vec<NewInfographic>, actor: Option<String>) -> RepoResult<Vec<Infographic>> {
        let mut s = self.state.write().unwrap();
        let mut taken: Vec<String> = s.infographics.values().map(|i| i.title.clone()).collect();
        let now = Utc::now();
        let mut out = Vec::with_capacity(new.len());
        for item in new {
            let title = listing::next_available_title(taken.iter().map(|t| t.as_str()), &item.title);
            taken.push(title.clone());
            let id = Self::next_id(&mut s);
            let row = Infographic {
                id,
                title,
                image_url: item.image_url,
                year: item.year,
                display_order: Self::order_or_append(item.display_order, s.infographics.len()),
                created_at: now,
                updated_at: now,
                created_by: actor.clone(),
            };
            s.infographics.insert(id, row.clone());
            out.push(row);
        }
        drop(s);
        self.persist();
        Ok(out)
    }
}

#[async_trait]
impl ContentRepo for InMemRepo {
    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.categories.values().cloned().collect();
        v.sort_by_key(|c| c.id);
        Ok(v)
    }
    async fn create_category(&self, new: NewCategory) -> RepoResult<Category> {
        let mut s = self.state.write().unwrap();
        let id = Self::next_id(&mut s);
        // Name uniqueness is a dashboard convention, not a store rule
        let row = Category { id, name: new.name, created_at: Utc::now() };
        s.categories.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_category(&self, id: Id, upd: NewCategory) -> RepoResult<Category> {
        let mut s = self.state.write().unwrap();
        let row = s.categories.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.name = upd.name;
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_category(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.categories.remove(&id).ok_or(RepoError::NotFound)?;
        // Detach referents instead of cascading
        for stat in s.statistics.values_mut() {
            if stat.category_id == Some(id) {
                stat.category_id = None;
            }
        }
        for item in s.content_items.values_mut() {
            if item.category_id == Some(id) {
                item.category_id = None;
            }
        }
        drop(s);
        self.persist();
        Ok(())
    }

    async fn list_content_items(&self) -> RepoResult<Vec<ContentItem>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s
            .content_items
            .values()
            .cloned()
            .map(|it| Self::item_with_category_name(&s, it))
            .collect();
        v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(v)
    }
    async fn create_content_item(&self, new: NewContentItem, actor: Option<String>) -> RepoResult<ContentItem> {
        let mut s = self.state.write().unwrap();
        Self::check_category(&s, new.category_id)?;
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = ContentItem {
            id,
            content_type: new.content_type,
            year: new.year,
            title: new.title,
            cover_image_url: new.cover_image_url,
            pdf_url_en: new.pdf_url_en,
            pdf_url_ar: new.pdf_url_ar,
            flipbook_url_en: new.flipbook_url_en,
            flipbook_url_ar: new.flipbook_url_ar,
            youtube_url: new.youtube_url,
            category_id: new.category_id,
            category_name: None,
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.content_items.insert(id, row.clone());
        let out = Self::item_with_category_name(&s, row);
        drop(s);
        self.persist();
        Ok(out)
    }
    async fn update_content_item(&self, id: Id, upd: NewContentItem) -> RepoResult<ContentItem> {
        let mut s = self.state.write().unwrap();
        Self::check_category(&s, upd.category_id)?;
        let row = s.content_items.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.content_type = upd.content_type;
        row.year = upd.year;
        row.title = upd.title;
        row.cover_image_url = upd.cover_image_url;
        row.pdf_url_en = upd.pdf_url_en;
        row.pdf_url_ar = upd.pdf_url_ar;
        row.flipbook_url_en = upd.flipbook_url_en;
        row.flipbook_url_ar = upd.flipbook_url_ar;
        row.youtube_url = upd.youtube_url;
        row.category_id = upd.category_id;
        row.updated_at = Utc::now();
        let updated = row.clone();
        let out = Self::item_with_category_name(&s, updated);
        drop(s);
        self.persist();
        Ok(out)
    }
    async fn delete_content_item(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.content_items.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
}

#[async_trait]
impl FaqRepo for InMemRepo {
    async fn list_faqs(&self) -> RepoResult<Vec<Faq>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.faqs.values().cloned().collect();
        v.sort_by_key(|x| (x.display_order, x.id));
        Ok(v)
    }
    async fn create_faq(&self, new: NewFaq, actor: Option<String>) -> RepoResult<Faq> {
        let mut s = self.state.write().unwrap();
        let now = Utc::now();
        let id = Self::next_id(&mut s);
        let row = Faq {
            id,
            question: new.question,
            answer: new.answer,
            display_order: Self::order_or_append(new.display_order, s.faqs.len()),
            created_at: now,
            updated_at: now,
            created_by: actor,
        };
        s.faqs.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn update_faq(&self, id: Id, upd: NewFaq) -> RepoResult<Faq> {
        let mut s = self.state.write().unwrap();
        let row = s.faqs.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.question = upd.question;
        row.answer = upd.answer;
        if let Some(order) = upd.display_order { row.display_order = order; }
        row.updated_at = Utc::now();
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
    async fn delete_faq(&self, id: Id) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        s.faqs.remove(&id).ok_or(RepoError::NotFound)?;
        drop(s);
        self.persist();
        Ok(())
    }
}

#[async_trait]
impl SettingsRepo for InMemRepo {
    async fn get_footer_settings(&self) -> RepoResult<FooterSettings> {
        let s = self.state.read().unwrap();
        Ok(s.footer.clone().unwrap_or_else(default_footer))
    }
    async fn upsert_footer_settings(&self, new: NewFooterSettings, actor: Option<String>) -> RepoResult<FooterSettings> {
        let mut s = self.state.write().unwrap();
        let row = FooterSettings {
            id: 1,
            about_text: new.about_text,
            email: new.email,
            phone: new.phone,
            address: new.address,
            twitter_url: new.twitter_url,
            linkedin_url: new.linkedin_url,
            instagram_url: new.instagram_url,
            youtube_url: new.youtube_url,
            copyright_text: new.copyright_text,
            updated_at: Utc::now(),
            updated_by: actor,
        };
        s.footer = Some(row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
}

#[async_trait]
impl InquiryRepo for InMemRepo {
    async fn create_inquiry(&self, new: NewInquiry) -> RepoResult<Inquiry> {
        let mut s = self.state.write().unwrap();
        let id = Self::next_id(&mut s);
        let row = Inquiry {
            id,
            name: new.name,
            company_name: new.company_name,
            email: new.email,
            phone: listing::compose_phone(&new.country_code, &new.phone),
            brief: new.brief,
            status: InquiryStatus::Pending,
            created_at: Utc::now(),
        };
        s.inquiries.insert(id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn list_inquiries(&self) -> RepoResult<Vec<Inquiry>> {
        let s = self.state.read().unwrap();
        let mut v: Vec<_> = s.inquiries.values().cloned().collect();
        v.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(v)
    }
    async fn set_inquiry_status(&self, id: Id, status: InquiryStatus) -> RepoResult<Inquiry> {
        let mut s = self.state.write().unwrap();
        let row = s.inquiries.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.status = status;
        let updated = row.clone();
        drop(s);
        self.persist();
        Ok(updated)
    }
}

#[async_trait]
impl UserRepo for InMemRepo {
    async fn find_user_by_email(&self, email: &str) -> RepoResult<AdminUser> {
        let s = self.state.read().unwrap();
        s.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    async fn get_user(&self, id: Uuid) -> RepoResult<AdminUser> {
        let s = self.state.read().unwrap();
        s.users.get(&id).cloned().ok_or(RepoError::NotFound)
    }
    async fn create_user(&self, email: String, password_hash: String, is_admin: bool) -> RepoResult<AdminUser> {
        let mut s = self.state.write().unwrap();
        if s.users.values().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(RepoError::Conflict);
        }
        let row = AdminUser {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        };
        s.users.insert(row.id, row.clone());
        drop(s);
        self.persist();
        Ok(row)
    }
    async fn set_password(&self, id: Uuid, password_hash: String) -> RepoResult<()> {
        let mut s = self.state.write().unwrap();
        let user = s.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.password_hash = password_hash;
        drop(s);
        self.persist();
        Ok(())
    }
}
