//! Catalog product record.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product category label.
///
/// Cards without a category belong to [`Category::ALL`], which is also the
/// filter value that matches every card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Label of the catch-all category.
    pub const ALL: &'static str = "all";

    /// Create a category from a label. Blank labels become [`Category::ALL`].
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.trim().is_empty() {
            Self::all()
        } else {
            Self(label)
        }
    }

    /// The catch-all category.
    #[must_use]
    pub fn all() -> Self {
        Self(Self::ALL.to_owned())
    }

    /// Whether this is the catch-all category.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Returns the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product as shown on a catalog card.
///
/// The serialized field names (`desc`, `img`) are the storage format used
/// for cart lines and the staged selection. Stored records may carry `null`
/// for any field but `id`; those decode to the field's default, and a
/// `null` or negative price decodes to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-unique identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Short description.
    #[serde(rename = "desc", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Unit price.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Price,
    /// Image reference, relative to the site root or absolute.
    #[serde(rename = "img", default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Category label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Price, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = Option::<Decimal>::deserialize(deserializer)?;
    Ok(amount
        .and_then(|amount| Price::new(amount).ok())
        .unwrap_or(Price::ZERO))
}

impl Product {
    /// Create a product with an empty description and image in the
    /// catch-all category.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: Category::all(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Category::new(category);
        self
    }
}
