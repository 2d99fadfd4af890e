//! Page renderers.
//!
//! Every renderer is a pure function of state: the same input produces the
//! same markup. Output is written into a [`Region`], which replaces its
//! previous content, so re-rendering after a mutation never accumulates
//! stale rows. Text is HTML-escaped by the templates.

use askama::Template;

use shopfront_core::{Product, format_amount};

use crate::carousel::{Carousel, Dot};
use crate::catalog::{ProductCard, ProductGrid, attrs};
use crate::filters;
use crate::models::cart::{Cart, CartLine};
use crate::routes::{Page, fix_path};

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: u32,
    pub image: String,
}

impl CartItemView {
    fn new(line: &CartLine, current: Page) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            description: line.product.description.clone(),
            price: line.product.price.to_string(),
            quantity: line.quantity,
            image: fix_path(&line.product.image, current),
        }
    }
}

/// Product display data for the detail page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl ProductView {
    fn new(product: &Product, current: Page) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: fix_path(&product.image, current),
        }
    }
}

/// Grid card display data.
#[derive(Debug, Clone)]
pub struct CardView {
    pub attributes: Vec<(String, String)>,
    pub visible: bool,
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl CardView {
    fn new(card: &ProductCard, current: Page) -> Self {
        let text = |name| card.attr(name).unwrap_or_default().to_owned();
        Self {
            attributes: card
                .attributes()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
            visible: card.is_visible(),
            id: text(attrs::ID),
            name: text(attrs::NAME),
            description: text(attrs::DESC),
            price: text(attrs::PRICE),
            image: fix_path(card.attr(attrs::IMG).unwrap_or_default(), current),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart rows fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub items: Vec<CartItemView>,
}

/// Product detail fragment.
#[derive(Template)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: Option<ProductView>,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Carousel indicator dots fragment.
#[derive(Template)]
#[template(path = "partials/carousel_dots.html")]
pub struct CarouselDotsTemplate {
    pub dots: Vec<Dot>,
}

/// Home page product grid fragment.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<CardView>,
}

/// A footer navigation link, relative to the page it is written on.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
}

/// Site footer with navigation and the current year.
#[derive(Template)]
#[template(path = "partials/footer.html")]
pub struct FooterTemplate {
    pub links: Vec<NavLink>,
}

const FOOTER_LINKS: [(Page, &str); 3] = [
    (Page::Home, "Home"),
    (Page::Cart, "Cart"),
    (Page::Login, "Login"),
];

// =============================================================================
// Renderers
// =============================================================================

/// Rendered cart page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    /// Cart rows, or the empty-cart message.
    pub items_html: String,
    /// Total with two decimals (`"0.00"` when empty).
    pub total: String,
    /// Checkout is unavailable for an empty cart.
    pub checkout_disabled: bool,
    /// Units in the cart, for the badge.
    pub count: u32,
}

/// Render the cart page.
///
/// # Errors
///
/// Returns `askama::Error` if a template fails to render.
pub fn render_cart(cart: &Cart, current: Page) -> askama::Result<CartPage> {
    let items = cart
        .lines()
        .iter()
        .map(|line| CartItemView::new(line, current))
        .collect();

    Ok(CartPage {
        items_html: CartItemsTemplate { items }.render()?,
        total: format_amount(cart.total()),
        checkout_disabled: cart.is_empty(),
        count: cart.item_count(),
    })
}

/// Render the product detail view, or "Product not found." without a
/// staged selection.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_product_detail(selected: Option<&Product>, current: Page) -> askama::Result<String> {
    ProductDetailTemplate {
        product: selected.map(|product| ProductView::new(product, current)),
    }
    .render()
}

/// Render the cart count badge.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_cart_count(count: u32) -> askama::Result<String> {
    CartCountTemplate { count }.render()
}

/// Render the carousel indicator dots.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_carousel_dots(carousel: &Carousel) -> askama::Result<String> {
    CarouselDotsTemplate {
        dots: carousel.dots(),
    }
    .render()
}

/// Render the product grid. Hidden cards are rendered with `display:none`.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_product_grid(grid: &ProductGrid, current: Page) -> askama::Result<String> {
    ProductGridTemplate {
        cards: grid
            .cards()
            .iter()
            .map(|card| CardView::new(card, current))
            .collect(),
    }
    .render()
}

/// Render the footer as written on `current`.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_footer(current: Page) -> askama::Result<String> {
    let links = FOOTER_LINKS
        .iter()
        .map(|&(page, label)| NavLink {
            label,
            href: page.href_from(current),
        })
        .collect();
    FooterTemplate { links }.render()
}

/// A named container on a page whose content is replaced on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    id: String,
    content: String,
}

impl Region {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content entirely.
    pub fn replace(&mut self, html: String) {
        self.content = html;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Datelike;
    use shopfront_core::Price;

    use super::*;

    fn mug() -> Product {
        Product::new("p1", "Mug <XL>", Price::from_cents(999))
            .with_description("Ceramic & glazed")
            .with_image("images/mug.jpg")
    }

    #[test]
    fn test_empty_cart() {
        let page = render_cart(&Cart::new(), Page::Cart).unwrap();
        assert!(page.items_html.contains("Your cart is empty."));
        assert_eq!(page.total, "0.00");
        assert!(page.checkout_disabled);
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_cart_rows() {
        let mut cart = Cart::new();
        cart.add(mug(), 2);
        cart.add(Product::new("p2", "Plate", Price::from_cents(500)), 1);

        let page = render_cart(&cart, Page::Cart).unwrap();
        assert_eq!(page.items_html.matches("class=\"cart-item\"").count(), 2);
        assert!(page.items_html.contains("qty-btn decrease\" data-id=\"p1\""));
        assert!(page.items_html.contains("qty-btn increase\" data-id=\"p2\""));
        assert!(page.items_html.contains("link remove\" data-id=\"p1\""));
        assert!(page.items_html.contains("Price: $9.99"));
        assert!(page.items_html.contains("../images/mug.jpg"));
        assert_eq!(page.total, "24.98");
        assert!(!page.checkout_disabled);
        assert_eq!(page.count, 3);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut cart = Cart::new();
        cart.add(mug(), 1);
        let page = render_cart(&cart, Page::Cart).unwrap();
        assert!(page.items_html.contains("Mug &#60;XL&#62;") || page.items_html.contains("Mug &lt;XL&gt;"));
        assert!(!page.items_html.contains("<XL>"));
    }

    #[test]
    fn test_region_replaces_content() {
        let mut cart = Cart::new();
        cart.add(mug(), 1);

        let mut region = Region::new("cart-items");
        region.replace(render_cart(&cart, Page::Cart).unwrap().items_html);
        let first = region.content().to_owned();
        region.replace(render_cart(&cart, Page::Cart).unwrap().items_html);

        assert_eq!(region.content(), first);
        assert_eq!(region.content().matches("class=\"cart-item\"").count(), 1);
    }

    #[test]
    fn test_product_detail() {
        let html = render_product_detail(None, Page::Product).unwrap();
        assert!(html.contains("Product not found."));

        let product = mug();
        let html = render_product_detail(Some(&product), Page::Product).unwrap();
        assert!(html.contains("Add to cart &amp; Checkout"));
        assert!(html.contains("Add to cart"));
        assert!(html.contains("<strong>$9.99</strong>"));
        assert!(html.contains("../images/mug.jpg"));
        assert!(!html.contains("Product not found."));
    }

    #[test]
    fn test_cart_count_badge() {
        assert!(render_cart_count(0).unwrap().contains(">0</span>"));
        assert!(render_cart_count(7).unwrap().contains(">7</span>"));
    }

    #[test]
    fn test_carousel_dots() {
        let mut carousel = Carousel::new(3).unwrap();
        carousel.go_to(2);
        let html = render_carousel_dots(&carousel).unwrap();
        assert_eq!(html.matches("<button").count(), 3);
        assert_eq!(html.matches("class=\"active\"").count(), 1);
        assert!(html.contains("data-index=\"2\" class=\"active\""));
    }

    #[test]
    fn test_grid_hides_filtered_cards() {
        let products = [
            mug().with_category("kitchen"),
            Product::new("p2", "Shoe", Price::from_cents(5000)).with_category("shoes"),
        ];
        let mut grid =
            ProductGrid::new(products.iter().map(ProductCard::from_product).collect());
        grid.apply_category_filter("shoes");

        let html = render_product_grid(&grid, Page::Home).unwrap();
        assert_eq!(html.matches("class=\"product-card\"").count(), 2);
        assert_eq!(html.matches("display:none").count(), 1);
        assert!(html.contains("data-category=\"shoes\""));
        assert!(html.contains("src=\"images/mug.jpg\""));
    }

    #[test]
    fn test_footer_year() {
        let year = chrono::Local::now().year().to_string();
        assert!(render_footer(Page::Home).unwrap().contains(&year));
    }

    #[test]
    fn test_footer_links_follow_current_page() {
        let home = render_footer(Page::Home).unwrap();
        assert!(home.contains("href=\"index.html\""));
        assert!(home.contains("href=\"pages/cart.html\""));

        let cart = render_footer(Page::Cart).unwrap();
        assert!(cart.contains("href=\"../index.html\""));
        assert!(cart.contains("href=\"cart.html\""));
        assert!(cart.contains("href=\"login.html\""));
    }
}
