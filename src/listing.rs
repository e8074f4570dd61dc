//! Pure helpers behind the public library listing and the inquiry form:
//! visibility filtering, ordering, pagination and small string composition
//! rules. Kept free of HTTP and storage so they can be unit tested directly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ContentItem, ContentType, Inquiry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Newest,
    Oldest,
}

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// True when the item carries at least one URL for its own content type.
/// Items failing this are hidden from public reads but stay visible to
/// admins, so a half-entered row can still be fixed from the dashboard.
pub fn has_playable_urls(item: &ContentItem) -> bool {
    fn filled(url: &Option<String>) -> bool {
        url.as_deref().map(|u| !u.trim().is_empty()).unwrap_or(false)
    }
    match item.content_type {
        ContentType::Pdf => filled(&item.pdf_url_en) || filled(&item.pdf_url_ar),
        ContentType::Flipbook => filled(&item.flipbook_url_en) || filled(&item.flipbook_url_ar),
        ContentType::Youtube => filled(&item.youtube_url),
    }
}

/// Order items by year in the requested direction, with two fixed rules on
/// top: videos always sort after documents, and within a year newer rows
/// come first (or last, for `Oldest`).
pub fn sort_items(items: &mut [ContentItem], dir: SortDir) {
    items.sort_by(|a, b| {
        let a_video = a.content_type == ContentType::Youtube;
        let b_video = b.content_type == ContentType::Youtube;
        a_video.cmp(&b_video).then_with(|| match dir {
            SortDir::Newest => b.year.cmp(&a.year).then(b.created_at.cmp(&a.created_at)),
            SortDir::Oldest => a.year.cmp(&b.year).then(a.created_at.cmp(&b.created_at)),
        })
    });
}

#[derive(Debug, Serialize, ToSchema)]
#[aliases(ContentPage = PageOut<ContentItem>, InquiryPage = PageOut<Inquiry>)]
pub struct PageOut<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Slice one page out of an already filtered and sorted set. Out-of-range
/// requests clamp to the nearest valid page rather than erroring; an empty
/// set reports zero pages and serves page 1 empty.
pub fn paginate<T>(items: Vec<T>, page: u32, per_page: u32) -> PageOut<T> {
    let per_page = per_page.clamp(1, MAX_PER_PAGE);
    let total_items = items.len() as u64;
    let total_pages = ((total_items + per_page as u64 - 1) / per_page as u64) as u32;
    let page = if total_pages == 0 { 1 } else { page.clamp(1, total_pages) };
    let offset = (page as usize - 1) * per_page as usize;
    let page_items = items.into_iter().skip(offset).take(per_page as usize).collect();
    PageOut { items: page_items, page, per_page, total_items, total_pages }
}

/// Join a dialling code and a local number with a single space, the shape
/// stored and shown everywhere ("+971 501234567").
pub fn compose_phone(country_code: &str, number: &str) -> String {
    format!("{} {}", country_code.trim(), number.trim())
}

/// First title not already taken: the requested one, else "title 2",
/// "title 3", ... counting past every numbered variant in use.
pub fn next_available_title<'a, I>(taken: I, requested: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: std::collections::HashSet<&str> = taken.into_iter().collect();
    if !taken.contains(requested) {
        return requested.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{} {}", requested, n);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: i64, ty: ContentType, year: i32, minute: u32) -> ContentItem {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap();
        ContentItem {
            id,
            content_type: ty,
            year,
            title: format!("item {}", id),
            cover_image_url: "https://cdn.example.com/cover.jpg".into(),
            pdf_url_en: match ty {
                ContentType::Pdf => Some("https://cdn.example.com/a.pdf".into()),
                _ => None,
            },
            pdf_url_ar: None,
            flipbook_url_en: match ty {
                ContentType::Flipbook => Some("https://flip.example.com/a".into()),
                _ => None,
            },
            flipbook_url_ar: None,
            youtube_url: match ty {
                ContentType::Youtube => Some("https://youtube.com/watch?v=x".into()),
                _ => None,
            },
            category_id: None,
            category_name: None,
            created_at: ts,
            updated_at: ts,
            created_by: None,
        }
    }

    #[test]
    fn pdf_without_urls_is_hidden() {
        let mut it = item(1, ContentType::Pdf, 2024, 0);
        assert!(has_playable_urls(&it));
        it.pdf_url_en = None;
        assert!(!has_playable_urls(&it));
        it.pdf_url_en = Some("   ".into());
        assert!(!has_playable_urls(&it));
        it.pdf_url_ar = Some("https://cdn.example.com/ar.pdf".into());
        assert!(has_playable_urls(&it));
    }

    #[test]
    fn other_groups_do_not_rescue_an_item() {
        let mut it = item(2, ContentType::Flipbook, 2024, 0);
        it.flipbook_url_en = None;
        it.pdf_url_en = Some("https://cdn.example.com/a.pdf".into());
        assert!(!has_playable_urls(&it));
    }

    #[test]
    fn videos_sort_last_both_directions() {
        let mut items = vec![
            item(1, ContentType::Youtube, 2030, 0),
            item(2, ContentType::Pdf, 2020, 1),
            item(3, ContentType::Flipbook, 2025, 2),
            item(4, ContentType::Youtube, 2010, 3),
        ];
        sort_items(&mut items, SortDir::Newest);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);

        sort_items(&mut items, SortDir::Oldest);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn same_year_newer_rows_first() {
        let mut items = vec![
            item(1, ContentType::Pdf, 2024, 0),
            item(2, ContentType::Pdf, 2024, 5),
        ];
        sort_items(&mut items, SortDir::Newest);
        assert_eq!(items[0].id, 2);
        sort_items(&mut items, SortDir::Oldest);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn pagination_slices_and_reports_totals() {
        let items: Vec<i32> = (0..45).collect();
        let page = paginate(items.clone(), 1, 20);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_items, 45);
        assert_eq!(page.total_pages, 3);

        let page = paginate(items.clone(), 3, 20);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0], 40);

        // out of range clamps to the last page
        let page = paginate(items.clone(), 99, 20);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5);

        // page zero clamps up
        let page = paginate(items, 0, 20);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn pagination_empty_set() {
        let page = paginate(Vec::<i32>::new(), 7, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn per_page_bounds() {
        let items: Vec<i32> = (0..300).collect();
        assert_eq!(paginate(items.clone(), 1, 0).per_page, 1);
        assert_eq!(paginate(items, 1, 1000).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn phone_is_code_space_number() {
        assert_eq!(compose_phone("+971", "501234567"), "+971 501234567");
        assert_eq!(compose_phone(" +1 ", " 5551234 "), "+1 5551234");
    }

    #[test]
    fn title_probe_skips_taken_variants() {
        let taken = ["Report", "Report 1"];
        assert_eq!(next_available_title(taken, "Report"), "Report 2");
        assert_eq!(next_available_title(taken, "Summary"), "Summary");
        assert_eq!(next_available_title([], "Report"), "Report");
    }
}
