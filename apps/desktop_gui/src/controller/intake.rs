//! Event intake: folds backend events into the catalog view state.
//!
//! Kept free of egui so it can be driven from tests; texture uploads need a
//! `Context` and are handed back to the caller as [`Intake::UploadTexture`].

use chrono::{DateTime, Utc};
use client_core::CatalogStore;
use shared::domain::ProductId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::images::{PreviewImage, ProductImages};

#[derive(Default)]
pub struct CatalogView {
    pub store: CatalogStore,
    pub images: ProductImages,
    pub status: String,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Follow-up work the caller owes after an event was applied.
#[derive(Debug, PartialEq)]
pub enum Intake {
    Idle,
    Dispatch(Vec<BackendCommand>),
    UploadTexture {
        product_id: ProductId,
        image: PreviewImage,
    },
}

pub fn apply_ui_event(view: &mut CatalogView, event: UiEvent) -> Intake {
    match event {
        UiEvent::Info(message) => {
            view.status = message;
            Intake::Idle
        }
        UiEvent::CatalogLoaded(snapshot) => {
            if !snapshot.rejected.is_empty() {
                tracing::debug!(rejected = snapshot.rejected.len(), "catalog records dropped");
            }
            view.fetched_at = Some(snapshot.fetched_at);
            view.images.clear();
            view.store.set_products(snapshot.products);
            view.status.clear();
            Intake::Dispatch(image_requests(view))
        }
        UiEvent::CatalogFetchFailed(error) => {
            // Store keeps whatever it had.
            tracing::debug!(
                context = ?error.context(),
                category = ?error.category(),
                "catalog unavailable: {}",
                error.message()
            );
            view.status.clear();
            Intake::Idle
        }
        UiEvent::ImageLoaded { product_id, image } => Intake::UploadTexture { product_id, image },
        UiEvent::ImageFailed { product_id, .. } => {
            view.images.mark_failed(product_id);
            Intake::Idle
        }
    }
}

fn image_requests(view: &mut CatalogView) -> Vec<BackendCommand> {
    let CatalogView { store, images, .. } = view;
    store
        .products()
        .iter()
        .filter(|p| images.begin_request(p.id))
        .map(|p| BackendCommand::FetchImage {
            product_id: p.id,
            url: p.image.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/intake_tests.rs"]
mod tests;
