//! Text formatting shared by the GUI cards and the CLI listing.

use std::fmt;

use shared::domain::{Product, ProductId};

pub const DEFAULT_TITLE_MAX_LEN: usize = 45;
pub const ELLIPSIS: &str = "...";
pub const STAR_SLOTS: u8 = 5;
pub const FILLED_STAR: char = '★';
pub const EMPTY_STAR: char = '☆';

/// Cuts `title` to `max_len` characters and appends [`ELLIPSIS`] when it was
/// longer. Counts chars, not bytes.
pub fn truncate_title(title: &str, max_len: usize) -> String {
    match title.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &title[..cut]),
        None => title.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub filled: u8,
}

impl StarRating {
    /// Rounds up to the next whole star.
    pub fn from_rate(rate: f64) -> Self {
        let filled = if rate.is_nan() {
            0
        } else {
            rate.ceil().clamp(0.0, f64::from(STAR_SLOTS)) as u8
        };
        Self { filled }
    }

    pub fn empty(&self) -> u8 {
        STAR_SLOTS - self.filled
    }

    /// One entry per slot, `true` for filled.
    pub fn slots(&self) -> impl Iterator<Item = bool> + '_ {
        (0..STAR_SLOTS).map(|slot| slot < self.filled)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for filled in self.slots() {
            write!(f, "{}", if filled { FILLED_STAR } else { EMPTY_STAR })?;
        }
        Ok(())
    }
}

pub fn price_label(price: f64) -> String {
    format!("Rs. {price}")
}

pub fn category_label(category: &str) -> String {
    format!("Category: {category}")
}

/// Everything a list card shows for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub stars: StarRating,
    pub rating_count: u64,
    pub price: String,
    pub category: String,
    pub image: String,
}

impl ProductCard {
    pub fn from_product(product: &Product, title_max_len: usize) -> Self {
        Self {
            id: product.id,
            title: truncate_title(&product.title, title_max_len),
            stars: StarRating::from_rate(product.rating.rate),
            rating_count: product.rating.count,
            price: price_label(product.price),
            category: category_label(&product.category),
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
