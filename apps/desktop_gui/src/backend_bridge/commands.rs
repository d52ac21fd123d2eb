//! Backend commands queued from UI to backend worker.

use shared::domain::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchCatalog,
    FetchImage { product_id: ProductId, url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchCatalog => "fetch_catalog",
            BackendCommand::FetchImage { .. } => "fetch_image",
        }
    }
}
