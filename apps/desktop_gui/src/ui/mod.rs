//! UI layer for the catalog screen: app shell, cards, modal, and product images.

pub mod app;
pub mod images;

pub use app::{CatalogApp, StartupConfig};
