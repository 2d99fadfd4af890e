//! Product catalog and card bridge.
//!
//! The catalog is the list of products the storefront sells. It is seeded
//! from YAML and rendered as a grid of [`ProductCard`]s. A card carries its
//! product as `data-*` attributes; [`extract_product`] turns a card back into
//! a [`Product`] value so that handlers deal in products, never in cards.

mod grid;

pub use grid::ProductGrid;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use shopfront_core::{Category, Price, Product, ProductId};

/// Built-in catalog used when no seed file is configured.
const DEFAULT_CATALOG: &str = include_str!("../../catalog/default.yaml");

/// Card attribute names.
pub mod attrs {
    pub const ID: &str = "data-id";
    pub const NAME: &str = "data-name";
    pub const DESC: &str = "data-desc";
    pub const PRICE: &str = "data-price";
    pub const IMG: &str = "data-img";
    pub const CATEGORY: &str = "data-category";
}

/// Errors from catalog loading and card extraction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A card has no usable `data-id`.
    #[error("product card has no data-id")]
    MissingId,

    /// Two catalog entries share an id.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    /// The seed file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid catalog YAML.
    #[error("invalid catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A rendered product card: `data-*` attributes plus a visibility flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    attributes: BTreeMap<String, String>,
    visible: bool,
}

impl ProductCard {
    /// A visible card with no attributes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
            visible: true,
        }
    }

    /// A visible card carrying every attribute of `product`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self::new()
            .with_attr(attrs::ID, product.id.as_str())
            .with_attr(attrs::NAME, &product.name)
            .with_attr(attrs::DESC, &product.description)
            .with_attr(attrs::PRICE, product.price.to_string())
            .with_attr(attrs::IMG, &product.image)
            .with_attr(attrs::CATEGORY, product.category.as_str())
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Read an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether the card is currently shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the card.
    pub const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for ProductCard {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a product from a card's attributes.
///
/// Missing text attributes become empty strings, a missing or unparsable
/// price becomes zero and a missing category becomes `"all"`.
///
/// # Errors
///
/// Returns `CatalogError::MissingId` if the card has no non-blank `data-id`.
pub fn extract_product(card: &ProductCard) -> Result<Product, CatalogError> {
    let id = card
        .attr(attrs::ID)
        .filter(|id| !id.trim().is_empty())
        .ok_or(CatalogError::MissingId)?;
    let text = |name| card.attr(name).unwrap_or_default().to_owned();

    Ok(Product {
        id: ProductId::new(id),
        name: text(attrs::NAME),
        description: text(attrs::DESC),
        price: Price::parse_lenient(card.attr(attrs::PRICE).unwrap_or_default()),
        image: text(attrs::IMG),
        category: Category::new(text(attrs::CATEGORY)),
    })
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The products on sale, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from YAML of the form `products: [{id, name, ...}]`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML and
    /// `CatalogError::DuplicateId` for repeated ids.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`Catalog::from_yaml`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&yaml)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` only if the bundled YAML is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(DEFAULT_CATALOG)
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order, excluding `"all"`.
    #[must_use]
    pub fn categories(&self) -> Vec<&Category> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| &p.category)
            .filter(|c| !c.is_all() && seen.insert(*c))
            .collect()
    }

    /// Render every product as a visible card.
    #[must_use]
    pub fn grid(&self) -> ProductGrid {
        ProductGrid::new(self.products.iter().map(ProductCard::from_product).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_card() {
        let card = ProductCard::new()
            .with_attr(attrs::ID, "p1")
            .with_attr(attrs::NAME, "Mug")
            .with_attr(attrs::DESC, "Ceramic mug")
            .with_attr(attrs::PRICE, "9.99")
            .with_attr(attrs::IMG, "images/mug.jpg")
            .with_attr(attrs::CATEGORY, "kitchen");

        let product = extract_product(&card).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.name, "Mug");
        assert_eq!(product.description, "Ceramic mug");
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.image, "images/mug.jpg");
        assert_eq!(product.category.as_str(), "kitchen");
    }

    #[test]
    fn test_extract_defaults() {
        let card = ProductCard::new()
            .with_attr(attrs::ID, "p2")
            .with_attr(attrs::PRICE, "n/a");

        let product = extract_product(&card).unwrap();
        assert_eq!(product.price, Price::ZERO);
        assert!(product.category.is_all());
        assert!(product.name.is_empty());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_extract_requires_id() {
        assert!(matches!(
            extract_product(&ProductCard::new().with_attr(attrs::NAME, "x")),
            Err(CatalogError::MissingId)
        ));
        assert!(matches!(
            extract_product(&ProductCard::new().with_attr(attrs::ID, "  ")),
            Err(CatalogError::MissingId)
        ));
    }

    #[test]
    fn test_card_roundtrips_product() {
        let product = Product::new("p3", "Plate & Bowl", Price::from_cents(1250))
            .with_description("Stoneware <set>")
            .with_image("images/plate.jpg")
            .with_category("kitchen");

        let card = ProductCard::from_product(&product);
        assert_eq!(extract_product(&card).unwrap(), product);
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.categories().is_empty());

        let first = &catalog.products()[0];
        assert_eq!(catalog.get(&first.id), Some(first));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = "products:\n  - {id: a, name: A, price: 1}\n  - {id: a, name: B, price: 2}\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_yaml_defaults_category() {
        let yaml = "products:\n  - {id: a, name: A, price: 1.5}\n";
        let catalog = Catalog::from_yaml(yaml).unwrap();
        let product = &catalog.products()[0];
        assert!(product.category.is_all());
        assert_eq!(product.price, Price::from_cents(150));
        assert!(catalog.categories().is_empty());
    }
}
