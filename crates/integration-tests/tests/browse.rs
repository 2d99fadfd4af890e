//! Catalog grid, product pages and carousel autoplay.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use shopfront_storefront::carousel::{AutoplayState, Carousel, CarouselPlayer};
use shopfront_storefront::catalog::{Catalog, ProductCard, attrs};
use shopfront_storefront::render::{render_carousel_dots, render_product_grid};
use shopfront_storefront::routes::Page;
use shopfront_storefront::store::MemoryStore;
use shopfront_storefront::{CardAction, Outcome, Storefront};

fn visible_ids(grid: &shopfront_storefront::catalog::ProductGrid) -> Vec<String> {
    grid.visible()
        .filter_map(|card| card.attr(attrs::ID))
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_builtin_catalog_filters() {
    let catalog = Catalog::builtin().unwrap();
    let mut grid = catalog.grid();
    assert_eq!(grid.visible().count(), catalog.len());

    assert_eq!(grid.apply_category_filter("shoes"), 2);
    assert_eq!(visible_ids(&grid), ["p1", "p2"]);

    assert_eq!(grid.apply_category_filter("all"), catalog.len());

    assert_eq!(grid.apply_search("  LEATHER "), 1);
    assert_eq!(visible_ids(&grid), ["p5"]);

    assert_eq!(grid.apply_search("no such thing"), 0);
    let html = render_product_grid(&grid, Page::Home).unwrap();
    assert_eq!(html.matches("display:none").count(), catalog.len());

    assert_eq!(grid.apply_search(""), catalog.len());
}

#[test]
fn test_card_click_opens_product_page() {
    let catalog = Catalog::builtin().unwrap();
    let grid = catalog.grid();
    let card = &grid.cards()[2];
    let mut shop = Storefront::new(MemoryStore::new());

    // Clicks on the card's own buttons are left to the button handlers
    let outcome = shop
        .handle_card(CardAction::Click { on_button: true }, card)
        .unwrap();
    assert_eq!(outcome, Outcome::none());
    assert!(shop.staged_product().is_none());

    let outcome = shop
        .handle_card(CardAction::Click { on_button: false }, card)
        .unwrap();
    assert_eq!(outcome, Outcome::navigate(Page::Product));

    let html = shop.product_page().unwrap();
    assert!(html.contains("Denim Jacket"));
    assert!(html.contains("$74.50"));
    assert!(html.contains("../images/denim-jacket.jpg"));
}

#[test]
fn test_card_add_uses_card_attributes() {
    let card = ProductCard::new()
        .with_attr(attrs::ID, "x1")
        .with_attr(attrs::NAME, "Loose Card")
        .with_attr(attrs::PRICE, "oops");
    let mut shop = Storefront::new(MemoryStore::new());

    let outcome = shop.handle_card(CardAction::AddToCart, &card).unwrap();
    assert_eq!(outcome, Outcome::navigate(Page::Cart));
    assert_eq!(shop.cart_page().unwrap().total, "0.00");
    assert_eq!(shop.badge_count(), 1);

    let nameless = ProductCard::new().with_attr(attrs::NAME, "No id");
    let outcome = shop.handle_card(CardAction::AddToCart, &nameless).unwrap();
    assert_eq!(outcome, Outcome::none());
    assert_eq!(shop.badge_count(), 1);
}

#[test]
fn test_absolute_images_kept_on_nested_pages() {
    let catalog = Catalog::builtin().unwrap();
    let tote = catalog.get(&"p6".into()).unwrap().clone();
    let mut shop = Storefront::new(MemoryStore::new());
    shop.dispatch(shopfront_storefront::StorefrontEvent::ViewProduct(tote))
        .unwrap();

    let html = shop.product_page().unwrap();
    assert!(html.contains("src=\"https://cdn.example.com/images/tote.jpg\""));
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_cycles_slides() {
    let mut player =
        CarouselPlayer::start(Carousel::new(3).unwrap(), Duration::from_secs(4)).unwrap();

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(player.advance().await);
    }
    assert_eq!(seen, [1, 2, 0, 1]);
    assert_eq!(player.carousel().transform(), "translateX(-100%)");

    let dots = render_carousel_dots(player.carousel()).unwrap();
    assert!(dots.contains("data-index=\"1\" class=\"active\""));
}

#[tokio::test(start_paused = true)]
async fn test_hover_pauses_autoplay() {
    let mut player =
        CarouselPlayer::start(Carousel::new(3).unwrap(), Duration::from_secs(4)).unwrap();

    player.pause();
    assert_eq!(player.state(), AutoplayState::Paused);
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(!player.try_advance());
    assert_eq!(player.carousel().index(), 0);

    player.resume().unwrap();
    assert_eq!(player.state(), AutoplayState::Running);
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!player.try_advance());
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(player.try_advance());
    assert_eq!(player.carousel().index(), 1);
}
