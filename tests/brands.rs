mod common;

use catalog_admin::forms::SectionForm;
use catalog_admin::pages::{Brands, CrudPage, Loader, Modal, NoticeKind};
use serde_json::{json, Value};

use common::Backend;

fn brand(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "<p>Outdoor gear</p>",
        "image": format!("brands/{id}.png"),
        "section_image_1": "brands/section.png",
        "section_description_1": "Built to last",
        "section_image_2": null,
        "status": 1
    })
}

#[tokio::test]
async fn create_without_image_sends_nothing() {
    let (client, backend) = common::spawn(Backend::new().with("brands", vec![brand(1, "Northwind")])).await;
    let mut page: CrudPage<Brands> = CrudPage::new(client, Loader::new(), 10);
    assert!(page.load().await);

    page.open_create();
    let form = page.form_mut().expect("create form is open");
    form.name = "Contoso".into();
    form.description = "<p>Tools</p>".into();

    assert!(!page.submit().await);
    assert_eq!(
        page.form_errors().and_then(|errors| errors.first("image")),
        Some("image is required")
    );
    assert!(page.modal.is_open());
    assert_eq!(backend.lock().unwrap().hits("/api/create-brand"), 0);
}

#[tokio::test]
async fn create_posts_sections_and_refetches() {
    let (client, backend) = common::spawn(Backend::new().with("brands", vec![brand(1, "Northwind")])).await;
    let loader = Loader::new();
    let mut page: CrudPage<Brands> = CrudPage::new(client, loader.clone(), 10);
    assert!(page.load().await);

    page.open_create();
    let form = page.form_mut().expect("create form is open");
    form.name = "Contoso".into();
    form.description = "<p>Tools</p>".into();
    form.image = Some("brands/contoso.png".into());
    assert!(form.add_section());
    form.sections[0] = SectionForm {
        image: Some("brands/contoso-1.png".into()),
        description: "Since 1990".into(),
    };

    assert!(page.submit().await);
    assert_eq!(page.modal, Modal::Closed);
    assert_eq!(page.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Success));
    assert_eq!(page.list.items.len(), 2);
    assert!(!loader.is_visible());

    let backend = backend.lock().unwrap();
    assert_eq!(backend.hits("/api/create-brand"), 1);
    assert_eq!(backend.hits("/api/brands"), 2);
    let body = backend.last_body("/api/create-brand").expect("create body recorded");
    assert_eq!(body["name"], "Contoso");
    assert_eq!(body["section_image_1"], "brands/contoso-1.png");
    assert_eq!(body["section_description_1"], "Since 1990");
    assert_eq!(body["section_image_2"], Value::Null);
}

#[tokio::test]
async fn edit_prepopulates_and_updates() {
    let (client, backend) = common::spawn(Backend::new().with("brands", vec![brand(1, "Northwind")])).await;
    let mut page: CrudPage<Brands> = CrudPage::new(client, Loader::new(), 10);
    assert!(page.load().await);

    assert!(page.open_edit(1).await);
    let form = page.form_mut().expect("edit form is open");
    assert_eq!(form.name, "Northwind");
    assert_eq!(form.image.as_deref(), Some("brands/1.png"));
    assert_eq!(form.sections.len(), 1);
    assert_eq!(form.sections[0].description, "Built to last");

    form.name = "Northwind Outdoors".into();
    assert!(page.submit().await);
    assert_eq!(page.list.items[0].name, "Northwind Outdoors");

    let backend = backend.lock().unwrap();
    assert_eq!(backend.hits("/api/brands/:id"), 1);
    assert_eq!(backend.hits("/api/update-brand/:id"), 1);
}

#[tokio::test]
async fn edit_of_missing_brand_shows_error() {
    let (client, _backend) = common::spawn(Backend::new()).await;
    let mut page: CrudPage<Brands> = CrudPage::new(client, Loader::new(), 10);

    assert!(!page.open_edit(42).await);
    assert_eq!(page.modal, Modal::Closed);
    let notice = page.notice.expect("error notice");
    assert!(notice.is_error());
    assert_eq!(notice.message, "Failed to load brand");
}
