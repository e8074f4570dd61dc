#![cfg(feature = "inmem-store")]

use reportal::models::{
    InquiryStatus, NewCategory, NewContentItem, NewFooterSettings, NewHeroSlide, NewInfographic,
    NewInquiry, ContentType,
};
use reportal::repo::inmem::InMemRepo;
use reportal::repo::{
    ContentRepo, InfographicRepo, InquiryRepo, RepoError, SectionRepo, SettingsRepo, UserRepo,
};

/// Fresh repository persisting into a throwaway directory.
fn repo() -> (InMemRepo, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("DATA_DIR", dir.path());
    (InMemRepo::new(), dir)
}

fn slide(title: &str) -> NewHeroSlide {
    NewHeroSlide {
        title: title.into(),
        subtitle: "sub".into(),
        image_url: "https://cdn.example.com/s.webp".into(),
        cta_label: None,
        cta_url: None,
        display_order: None,
    }
}

fn infographic(title: &str) -> NewInfographic {
    NewInfographic {
        title: title.into(),
        image_url: "https://cdn.example.com/i.webp".into(),
        year: 2024,
        display_order: None,
    }
}

#[tokio::test]
#[serial_test::serial]
async fn snapshot_survives_a_restart_and_ids_keep_climbing() {
    let (r, _dir) = repo();

    let first = r.create_hero_slide(slide("One"), Some("admin@example.com".into())).await.unwrap();
    let second = r.create_hero_slide(slide("Two"), None).await.unwrap();
    r.delete_hero_slide(second.id).await.unwrap();
    r.create_inquiry(NewInquiry {
        name: "Caller".into(),
        company_name: "Acme".into(),
        email: "c@acme.example".into(),
        country_code: "+971".into(),
        phone: "501234567".into(),
        brief: "Brief".into(),
    })
    .await
    .unwrap();
    drop(r);

    // same DATA_DIR: the snapshot comes back up
    let r = InMemRepo::new();
    let slides = r.list_hero_slides().await.unwrap();
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].title, "One");
    assert_eq!(slides[0].created_by.as_deref(), Some("admin@example.com"));

    let inquiries = r.list_inquiries().await.unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].phone, "+971 501234567");
    assert_eq!(inquiries[0].status, InquiryStatus::Pending);

    // the deleted row's id stays burned after the reload
    let third = r.create_hero_slide(slide("Three"), None).await.unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}

#[tokio::test]
#[serial_test::serial]
async fn footer_has_defaults_before_the_first_write() {
    let (r, _dir) = repo();

    let footer = r.get_footer_settings().await.unwrap();
    assert_eq!(footer.email, "hello@example.com");

    let updated = r
        .upsert_footer_settings(
            NewFooterSettings {
                about_text: "About us.".into(),
                email: "team@reportal.example".into(),
                phone: "+971 40000000".into(),
                address: "Dubai".into(),
                twitter_url: None,
                linkedin_url: None,
                instagram_url: None,
                youtube_url: None,
                copyright_text: "© Reportal.".into(),
            },
            Some("admin@example.com".into()),
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "team@reportal.example");
    assert_eq!(updated.updated_by.as_deref(), Some("admin@example.com"));

    let read_back = r.get_footer_settings().await.unwrap();
    assert_eq!(read_back.email, "team@reportal.example");
}

#[tokio::test]
#[serial_test::serial]
async fn deleting_a_category_orphans_its_content_gracefully() {
    let (r, _dir) = repo();

    let category = r.create_category(NewCategory { name: "Energy".into() }).await.unwrap();
    let item = r
        .create_content_item(
            NewContentItem {
                content_type: ContentType::Pdf,
                year: 2024,
                title: "Grid report".into(),
                cover_image_url: "https://cdn.example.com/grid.webp".into(),
                pdf_url_en: Some("https://cdn.example.com/grid.pdf".into()),
                pdf_url_ar: None,
                flipbook_url_en: None,
                flipbook_url_ar: None,
                youtube_url: None,
                category_id: Some(category.id),
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(item.category_name.as_deref(), Some("Energy"));

    r.delete_category(category.id).await.unwrap();

    let items = r.list_content_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category_id, None);
    assert_eq!(items[0].category_name, None);
}

#[tokio::test]
#[serial_test::serial]
async fn content_item_with_unknown_category_is_refused() {
    let (r, _dir) = repo();

    let err = r
        .create_content_item(
            NewContentItem {
                content_type: ContentType::Youtube,
                year: 2024,
                title: "Film".into(),
                cover_image_url: "https://cdn.example.com/f.webp".into(),
                pdf_url_en: None,
                pdf_url_ar: None,
                flipbook_url_en: None,
                flipbook_url_ar: None,
                youtube_url: Some("https://youtube.com/watch?v=x".into()),
                category_id: Some(999),
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
#[serial_test::serial]
async fn bulk_infographics_resolve_titles_against_existing_rows() {
    let (r, _dir) = repo();

    r.create_infographic(infographic("Report"), None).await.unwrap();
    r.create_infographic(infographic("Report 1"), None).await.unwrap();

    let rows = r
        .create_infographics_bulk(vec![infographic("Report"), infographic("Other")], None)
        .await
        .unwrap();
    assert_eq!(rows[0].title, "Report 2");
    assert_eq!(rows[1].title, "Other");

    let titles = r.infographic_titles().await.unwrap();
    assert_eq!(titles.len(), 4);
}

#[tokio::test]
#[serial_test::serial]
async fn admin_accounts_enforce_unique_email_case_insensitively() {
    let (r, _dir) = repo();

    let user = r
        .create_user("admin@reportal.example".into(), "hash-one".into(), true)
        .await
        .unwrap();

    let err = r
        .create_user("ADMIN@reportal.example".into(), "hash-two".into(), true)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict));

    // lookup ignores case too
    let found = r.find_user_by_email("Admin@Reportal.Example").await.unwrap();
    assert_eq!(found.id, user.id);

    r.set_password(user.id, "hash-three".into()).await.unwrap();
    let reread = r.get_user(user.id).await.unwrap();
    assert_eq!(reread.password_hash, "hash-three");
}
