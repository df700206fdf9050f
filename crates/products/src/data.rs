//! Product input shapes: the raw request body and its validated form.

use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult};

/// Largest accepted price; keeps values representable in a signed 64-bit column.
pub const MAX_PRICE: u64 = i64::MAX as u64;

/// Create/update request body as received.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported by [`ProductData::validate`] instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductData {
    pub name: Option<String>,
    pub maker: Option<String>,
    pub price: Option<u64>,
    pub image_url: Option<String>,
}

impl ProductData {
    /// Check the body and produce the attributes the service accepts.
    ///
    /// All problems are reported together, separated by `"; "`.
    pub fn validate(self) -> DomainResult<ProductAttributes> {
        let mut problems = Vec::new();

        let name = required_text("name", self.name, &mut problems);
        let maker = required_text("maker", self.maker, &mut problems);
        let price = match self.price {
            Some(p) if p > MAX_PRICE => {
                problems.push("price is out of range".to_string());
                None
            }
            Some(p) => Some(p),
            None => {
                problems.push("price is required".to_string());
                None
            }
        };

        match (name, maker, price) {
            (Some(name), Some(maker), Some(price)) => Ok(ProductAttributes {
                name,
                maker,
                price,
                image_url: normalize_url(self.image_url),
            }),
            _ => Err(DomainError::validation(problems.join("; "))),
        }
    }
}

fn required_text(field: &str, value: Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        Some(_) => {
            problems.push(format!("{field} must not be blank"));
            None
        }
        None => {
            problems.push(format!("{field} is required"));
            None
        }
    }
}

fn normalize_url(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validated descriptive fields of a product.
///
/// Only constructible through validation, so holding one proves the input
/// passed the rules in [`ProductData::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttributes {
    name: String,
    maker: String,
    price: u64,
    image_url: Option<String>,
}

impl ProductAttributes {
    pub fn new(
        name: impl Into<String>,
        maker: impl Into<String>,
        price: u64,
        image_url: Option<String>,
    ) -> DomainResult<Self> {
        ProductData {
            name: Some(name.into()),
            maker: Some(maker.into()),
            price: Some(price),
            image_url,
        }
        .validate()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maker(&self) -> &str {
        &self.maker
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, String, u64, Option<String>) {
        (self.name, self.maker, self.price, self.image_url)
    }
}
