//! Backend-to-UI events and error modeling for the catalog screen.

use shared::{domain::ProductId, error::CatalogError, protocol::CatalogSnapshot};

use crate::ui::images::PreviewImage;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    CatalogLoaded(CatalogSnapshot),
    CatalogFetchFailed(UiError),
    ImageLoaded {
        product_id: ProductId,
        image: PreviewImage,
    },
    ImageFailed {
        product_id: ProductId,
        error: UiError,
    },
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Info(_) => "info",
            UiEvent::CatalogLoaded(_) => "catalog_loaded",
            UiEvent::CatalogFetchFailed(_) => "catalog_fetch_failed",
            UiEvent::ImageLoaded { .. } => "image_loaded",
            UiEvent::ImageFailed { .. } => "image_failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    FetchCatalog,
    FetchImage,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
            || message_lower.contains("decode")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_catalog_error(context: UiErrorContext, err: &CatalogError) -> Self {
        let category = match err {
            CatalogError::Transport(_) | CatalogError::Status { .. } => UiErrorCategory::Transport,
            CatalogError::Decode(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
