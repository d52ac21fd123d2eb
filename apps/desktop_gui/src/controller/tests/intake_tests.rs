use super::*;
use crate::controller::events::{UiError, UiErrorContext};
use client_core::CatalogStore;
use shared::{
    domain::{Product, Rating},
    protocol::CatalogSnapshot,
};

fn product(id: i64) -> Product {
    Product {
        id: ProductId(id),
        title: format!("product {id}"),
        price: 10.0,
        description: String::new(),
        category: "men".to_string(),
        image: format!("https://img.test/{id}.png"),
        rating: Rating {
            rate: 4.1,
            count: 20,
        },
        quantity: None,
    }
}

fn loaded(products: Vec<Product>) -> UiEvent {
    UiEvent::CatalogLoaded(CatalogSnapshot {
        products,
        rejected: Vec::new(),
        fetched_at: Utc::now(),
    })
}

fn fetch_failed() -> UiEvent {
    UiEvent::CatalogFetchFailed(UiError::from_message(
        UiErrorContext::FetchCatalog,
        "connection refused",
    ))
}

#[test]
fn catalog_loaded_sets_products_and_requests_images() {
    let mut view = CatalogView::default();

    let intake = apply_ui_event(&mut view, loaded(vec![product(1), product(2)]));

    assert_eq!(
        intake,
        Intake::Dispatch(vec![
            BackendCommand::FetchImage {
                product_id: ProductId(1),
                url: "https://img.test/1.png".to_string(),
            },
            BackendCommand::FetchImage {
                product_id: ProductId(2),
                url: "https://img.test/2.png".to_string(),
            },
        ])
    );
    assert_eq!(view.store.products(), &[product(1), product(2)]);
    assert!(view.fetched_at.is_some());
    assert!(view.images.is_pending(ProductId(1)));
}

#[test]
fn fetch_failure_after_load_leaves_store_untouched() {
    let mut view = CatalogView::default();
    apply_ui_event(&mut view, loaded(vec![product(1)]));
    view.store.add_to_cart(ProductId(1));
    let before: CatalogStore = view.store.clone();
    let fetched_at = view.fetched_at;

    assert_eq!(apply_ui_event(&mut view, fetch_failed()), Intake::Idle);

    assert_eq!(view.store, before);
    assert_eq!(view.fetched_at, fetched_at);
    assert!(view.images.is_pending(ProductId(1)));
}

#[test]
fn fetch_failure_on_empty_view_keeps_it_empty() {
    let mut view = CatalogView {
        status: "Backend worker starting...".to_string(),
        ..CatalogView::default()
    };

    assert_eq!(apply_ui_event(&mut view, fetch_failed()), Intake::Idle);
    assert!(view.store.is_empty());
    assert!(view.status.is_empty());
    assert!(view.fetched_at.is_none());
}

#[test]
fn reload_requests_images_again() {
    let mut view = CatalogView::default();
    apply_ui_event(&mut view, loaded(vec![product(1)]));
    apply_ui_event(
        &mut view,
        UiEvent::ImageFailed {
            product_id: ProductId(1),
            error: UiError::from_message(UiErrorContext::FetchImage, "decode failed"),
        },
    );
    assert!(view.images.is_failed(ProductId(1)));

    match apply_ui_event(&mut view, loaded(vec![product(1)])) {
        Intake::Dispatch(commands) => assert_eq!(commands.len(), 1),
        other => panic!("unexpected intake: {other:?}"),
    }
    assert!(view.images.is_pending(ProductId(1)));
}

#[test]
fn duplicate_ids_request_one_image() {
    let mut view = CatalogView::default();
    match apply_ui_event(&mut view, loaded(vec![product(3), product(3)])) {
        Intake::Dispatch(commands) => assert_eq!(commands.len(), 1),
        other => panic!("unexpected intake: {other:?}"),
    }
    assert_eq!(view.store.len(), 2);
}

#[test]
fn loaded_image_is_handed_back_for_upload() {
    let mut view = CatalogView::default();
    let image = PreviewImage {
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
    };

    let intake = apply_ui_event(
        &mut view,
        UiEvent::ImageLoaded {
            product_id: ProductId(4),
            image: image.clone(),
        },
    );
    assert_eq!(
        intake,
        Intake::UploadTexture {
            product_id: ProductId(4),
            image
        }
    );
}

#[test]
fn info_updates_status() {
    let mut view = CatalogView::default();
    apply_ui_event(&mut view, UiEvent::Info("Backend worker starting...".to_string()));
    assert_eq!(view.status, "Backend worker starting...");
}
