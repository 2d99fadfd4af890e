//! In-place filtering of the rendered product grid.
//!
//! Category filter and text search both recompute visibility for every card
//! from the card's own attributes. Neither remembers the other, so running a
//! search after a filter replaces the filter's result rather than narrowing
//! it.

use shopfront_core::Category;

use super::{ProductCard, attrs};

/// The cards currently rendered on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductGrid {
    cards: Vec<ProductCard>,
}

impl ProductGrid {
    #[must_use]
    pub const fn new(cards: Vec<ProductCard>) -> Self {
        Self { cards }
    }

    /// All cards, shown or not, in display order.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Cards that are currently shown.
    pub fn visible(&self) -> impl Iterator<Item = &ProductCard> {
        self.cards.iter().filter(|card| card.is_visible())
    }

    /// Show only cards in `category`. `"all"` shows every card.
    ///
    /// Returns the number of visible cards.
    pub fn apply_category_filter(&mut self, category: &str) -> usize {
        let category = Category::new(category);
        for card in &mut self.cards {
            let shown = category.is_all()
                || card.attr(attrs::CATEGORY).unwrap_or(Category::ALL) == category.as_str();
            card.set_visible(shown);
        }
        tracing::debug!(category = %category, "Applied category filter");
        self.visible().count()
    }

    /// Show only cards whose name or description contains `query`,
    /// ignoring case. A blank query shows every card; cards that do not
    /// match are hidden.
    ///
    /// Returns the number of visible cards.
    pub fn apply_search(&mut self, query: &str) -> usize {
        let needle = query.trim().to_lowercase();
        for card in &mut self.cards {
            let shown = needle.is_empty() || matches_query(card, &needle);
            card.set_visible(shown);
        }
        let visible = self.visible().count();
        tracing::debug!(query = %needle, visible, "Applied search");
        visible
    }
}

fn matches_query(card: &ProductCard, needle: &str) -> bool {
    [attrs::NAME, attrs::DESC]
        .into_iter()
        .filter_map(|name| card.attr(name))
        .any(|text| text.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use shopfront_core::{Price, Product};

    use super::*;

    fn grid() -> ProductGrid {
        let products = [
            Product::new("p1", "Blue Mug", Price::from_cents(999))
                .with_description("Ceramic, dishwasher safe")
                .with_category("kitchen"),
            Product::new("p2", "Running Shoe", Price::from_cents(5999))
                .with_description("Lightweight trainer")
                .with_category("shoes"),
            Product::new("p3", "Gift Card", Price::from_cents(2500)),
        ];
        ProductGrid::new(products.iter().map(ProductCard::from_product).collect())
    }

    fn visible_ids(grid: &ProductGrid) -> Vec<&str> {
        grid.visible()
            .filter_map(|card| card.attr(attrs::ID))
            .collect()
    }

    #[test]
    fn test_category_filter_exact_match() {
        let mut grid = grid();
        assert_eq!(grid.apply_category_filter("shoes"), 1);
        assert_eq!(visible_ids(&grid), ["p2"]);

        // Exact, case-sensitive
        assert_eq!(grid.apply_category_filter("Shoes"), 0);
    }

    #[test]
    fn test_category_all_shows_everything() {
        let mut grid = grid();
        grid.apply_category_filter("kitchen");
        assert_eq!(grid.apply_category_filter("all"), 3);
        assert_eq!(grid.apply_category_filter(""), 3);
    }

    #[test]
    fn test_search_name_and_description_case_insensitive() {
        let mut grid = grid();
        assert_eq!(grid.apply_search("MUG"), 1);
        assert_eq!(visible_ids(&grid), ["p1"]);

        assert_eq!(grid.apply_search("  trainer "), 1);
        assert_eq!(visible_ids(&grid), ["p2"]);
    }

    #[test]
    fn test_search_without_matches_hides_all() {
        let mut grid = grid();
        assert_eq!(grid.apply_search("umbrella"), 0);
        assert_eq!(visible_ids(&grid), Vec::<&str>::new());
        assert_eq!(grid.cards().len(), 3);
    }

    #[test]
    fn test_blank_search_shows_all() {
        let mut grid = grid();
        grid.apply_search("umbrella");
        assert_eq!(grid.apply_search("   "), 3);
    }

    #[test]
    fn test_search_replaces_filter() {
        let mut grid = grid();
        grid.apply_category_filter("kitchen");
        assert_eq!(grid.apply_search("shoe"), 1);
        assert_eq!(visible_ids(&grid), ["p2"]);
    }
}
