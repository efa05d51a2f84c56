mod common;

use catalog_admin::pages::{Brands, CrudPage, Loader};
use serde_json::{json, Value};
use std::time::Duration;

use common::Backend;

fn brands(count: i64) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Brand {id:02}"),
                "image": format!("brands/{id}.png"),
                "status": true
            })
        })
        .collect()
}

#[tokio::test]
async fn page_change_refetches_exactly_once() {
    let (client, backend) = common::spawn(Backend::new().with("brands", brands(25))).await;
    let mut page: CrudPage<Brands> = CrudPage::new(client, Loader::new(), 10);
    assert!(page.load().await);

    assert_eq!(page.list.pager.last_page(), 3);
    assert!(!page.list.pager.has_previous());
    assert!(!page.previous_page().await);
    assert_eq!(backend.lock().unwrap().hits("/api/brands"), 1);

    assert!(page.change_page(2).await);
    assert!(!page.change_page(2).await);
    {
        let backend = backend.lock().unwrap();
        assert_eq!(backend.hits("/api/brands"), 2);
        let query = backend.last_query("/api/brands").expect("query recorded");
        assert_eq!(query.get("page").map(String::as_str), Some("2"));
        assert_eq!(query.get("per_page").map(String::as_str), Some("10"));
    }
    assert_eq!(page.list.items[0].name, "Brand 11");

    assert!(page.next_page().await);
    assert_eq!(page.list.items.len(), 5);
    assert!(!page.list.pager.has_next());
    assert!(!page.next_page().await);
    assert_eq!(backend.lock().unwrap().hits("/api/brands"), 3);
    assert_eq!(page.list.pager.range_label(), "Showing 21-25 of 25");
}

#[tokio::test]
async fn deleting_last_row_steps_back_a_page() {
    let (client, _backend) = common::spawn(Backend::new().with("brands", brands(21))).await;
    let mut page: CrudPage<Brands> = CrudPage::new(client, Loader::new(), 10);
    assert!(page.load().await);
    assert!(page.change_page(3).await);
    assert_eq!(page.list.items.len(), 1);

    page.request_delete(21);
    assert!(page.confirm().await);
    assert_eq!(page.list.pager.page(), 2);
    assert_eq!(page.list.items.len(), 10);
    assert!(!page.is_busy());
}

#[tokio::test]
async fn search_resets_to_first_page() {
    let (client, backend) = common::spawn(Backend::new().with("brands", brands(25))).await;
    let mut page: CrudPage<Brands> =
        CrudPage::new(client, Loader::new(), 10).with_search_delay(Duration::ZERO);
    assert!(page.load().await);
    assert!(page.change_page(2).await);

    assert!(page.search("  brand 2 ").await);
    assert_eq!(page.list.pager.page(), 1);
    assert_eq!(page.query().search.as_deref(), Some("brand 2"));
    assert_eq!(page.list.items.len(), 6);

    let query = backend.lock().unwrap().last_query("/api/brands").expect("query recorded");
    assert_eq!(query.get("search").map(String::as_str), Some("brand 2"));
}

#[tokio::test]
async fn superseded_search_does_not_fetch() {
    let (client, backend) = common::spawn(Backend::new().with("brands", brands(5))).await;
    let mut page: CrudPage<Brands> =
        CrudPage::new(client, Loader::new(), 10).with_search_delay(Duration::from_millis(50));
    let debouncer = page.search_debouncer();

    let search = page.search("brand");
    let newer = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        debouncer.trigger();
    };
    let (fetched, _) = tokio::join!(search, newer);

    assert!(!fetched);
    assert_eq!(backend.lock().unwrap().hits("/api/brands"), 0);
}
