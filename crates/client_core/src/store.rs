//! Catalog store: the product list plus per-product cart quantities.
//!
//! The store is a plain value owned by whoever renders it. All four
//! transitions are synchronous and total: they either mutate one entry (or
//! the whole list) or leave the state untouched and hand back a
//! [`StoreDiagnostic`]. Diagnostics are also logged at `warn`.

use std::collections::HashSet;

use shared::domain::{Product, ProductId};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreDiagnostic {
    #[error("product with id {0} not found")]
    UnknownProduct(ProductId),
    #[error("product with id {0} already has a quantity of 0")]
    AlreadyZero(ProductId),
    #[error("attempted to add non-existent product with id {0} to cart")]
    AddUnknownProduct(ProductId),
}

impl StoreDiagnostic {
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::UnknownProduct(id) | Self::AlreadyZero(id) | Self::AddUnknownProduct(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    SetProducts(Vec<Product>),
    Increment(ProductId),
    Decrement(ProductId),
    AddToCart(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Replaced { len: usize },
    Applied { id: ProductId, quantity: u32 },
    Ignored(StoreDiagnostic),
}

impl Transition {
    pub fn diagnostic(&self) -> Option<StoreDiagnostic> {
        match self {
            Self::Ignored(diagnostic) => Some(*diagnostic),
            _ => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: CatalogAction) -> Transition {
        match action {
            CatalogAction::SetProducts(list) => self.set_products(list),
            CatalogAction::Increment(id) => self.increment_quantity(id),
            CatalogAction::Decrement(id) => self.decrement_quantity(id),
            CatalogAction::AddToCart(id) => self.add_to_cart(id),
        }
    }

    /// Replaces the whole list. Duplicate ids are kept as-is; later
    /// transitions only ever reach the first entry with a given id.
    pub fn set_products(&mut self, list: Vec<Product>) -> Transition {
        let mut seen = HashSet::with_capacity(list.len());
        let duplicates: Vec<i64> = list
            .iter()
            .filter(|p| !seen.insert(p.id))
            .map(|p| p.id.0)
            .collect();
        if !duplicates.is_empty() {
            warn!(?duplicates, "catalog contains duplicate product ids");
        }

        self.products = list;
        debug!(len = self.products.len(), "catalog store replaced");
        Transition::Replaced {
            len: self.products.len(),
        }
    }

    pub fn increment_quantity(&mut self, id: ProductId) -> Transition {
        let Some(product) = self.find_mut(id) else {
            return ignored(StoreDiagnostic::UnknownProduct(id));
        };
        let quantity = product.quantity().saturating_add(1);
        product.quantity = Some(quantity);
        Transition::Applied { id, quantity }
    }

    pub fn decrement_quantity(&mut self, id: ProductId) -> Transition {
        let Some(product) = self.find_mut(id) else {
            return ignored(StoreDiagnostic::UnknownProduct(id));
        };
        match product.quantity() {
            0 => ignored(StoreDiagnostic::AlreadyZero(id)),
            current => {
                let quantity = current - 1;
                product.quantity = Some(quantity);
                Transition::Applied { id, quantity }
            }
        }
    }

    /// Adds one unit to the cart. Cumulative: repeated calls keep counting up,
    /// same as the `+` stepper.
    pub fn add_to_cart(&mut self, id: ProductId) -> Transition {
        let Some(product) = self.find_mut(id) else {
            return ignored(StoreDiagnostic::AddUnknownProduct(id));
        };
        let quantity = product.quantity.unwrap_or(0).saturating_add(1);
        product.quantity = Some(quantity);
        Transition::Applied { id, quantity }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn quantity(&self, id: ProductId) -> Option<u32> {
        self.get(id).map(Product::quantity)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products currently in the cart, in catalog order.
    pub fn cart_lines(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.quantity() > 0)
    }

    /// Sum of price x quantity over the cart. An empty cart is `+0.0`.
    pub fn cart_total(&self) -> f64 {
        self.cart_lines()
            .fold(0.0, |total, product| total + product.line_total())
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }
}

fn ignored(diagnostic: StoreDiagnostic) -> Transition {
    warn!(product_id = diagnostic.product_id().0, "{diagnostic}");
    Transition::Ignored(diagnostic)
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
