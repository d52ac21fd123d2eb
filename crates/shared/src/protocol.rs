use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Product, ProductId, Rating},
    error::{CatalogError, RecordError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// Raw catalog entry exactly as the endpoint sends it. Nothing is trusted
/// until it goes through `Product::try_from`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingRecord>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = RecordError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(RecordError::MissingField("id"))?;
        let title = record.title.ok_or(RecordError::MissingField("title"))?;
        let price = record.price.ok_or(RecordError::MissingField("price"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(RecordError::OutOfRange {
                field: "price",
                value: price,
            });
        }
        let category = record
            .category
            .ok_or(RecordError::MissingField("category"))?;
        let image = record.image.ok_or(RecordError::MissingField("image"))?;
        if image.trim().is_empty() {
            return Err(RecordError::Empty("image"));
        }

        let rating = record.rating.ok_or(RecordError::MissingField("rating"))?;
        let rate = rating.rate.ok_or(RecordError::MissingField("rating.rate"))?;
        if !rate.is_finite() || !(0.0..=5.0).contains(&rate) {
            return Err(RecordError::OutOfRange {
                field: "rating.rate",
                value: rate,
            });
        }
        let count = rating
            .count
            .ok_or(RecordError::MissingField("rating.count"))?;

        Ok(Product {
            id,
            title,
            price,
            description: record.description.unwrap_or_default(),
            category,
            image,
            rating: Rating { rate, count },
            quantity: record.quantity,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the response array.
    pub index: usize,
    pub id: Option<ProductId>,
    pub reason: RecordError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCatalog {
    pub products: Vec<Product>,
    pub rejected: Vec<RejectedRecord>,
}

/// Decodes a catalog response body. The body must be a JSON array; entries
/// that fail validation are collected in `rejected` and do not abort the
/// decode.
pub fn decode_catalog(body: &[u8]) -> Result<DecodedCatalog, CatalogError> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let mut products = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .map(ProductId);
        let outcome = serde_json::from_value::<ProductRecord>(entry)
            .map_err(|err| RecordError::Shape(err.to_string()))
            .and_then(Product::try_from);
        match outcome {
            Ok(product) => products.push(product),
            Err(reason) => rejected.push(RejectedRecord { index, id, reason }),
        }
    }

    Ok(DecodedCatalog { products, rejected })
}

/// One completed catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub rejected: Vec<RejectedRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn from_decoded(decoded: DecodedCatalog, fetched_at: DateTime<Utc>) -> Self {
        Self {
            products: decoded.products,
            rejected: decoded.rejected,
            fetched_at,
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
