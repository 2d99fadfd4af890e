//! Page locations and relative links.
//!
//! # Page Structure
//!
//! ```text
//! index.html          - Home: carousel, category filter, search, product grid
//! pages/cart.html     - Cart page
//! pages/product.html  - Product detail for the staged selection
//! pages/login.html    - Login form
//! pages/signup.html   - Signup form
//! pages/payment.html  - Demo payment form
//! ```
//!
//! Navigation is a full-page move to one of these fixed paths. Links are
//! always relative, so a link depends on which page it is written from.

use std::fmt;

/// Directory holding every page except the home page.
const PAGES_DIR: &str = "pages/";

/// A storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Cart,
    Product,
    Login,
    Signup,
    Payment,
}

impl Page {
    /// Every page, home first.
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Cart,
        Self::Product,
        Self::Login,
        Self::Signup,
        Self::Payment,
    ];

    /// Path of the page relative to the site root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Cart => "pages/cart.html",
            Self::Product => "pages/product.html",
            Self::Login => "pages/login.html",
            Self::Signup => "pages/signup.html",
            Self::Payment => "pages/payment.html",
        }
    }

    /// Whether the page lives under `pages/`.
    #[must_use]
    pub const fn is_nested(self) -> bool {
        !matches!(self, Self::Home)
    }

    /// Relative link to this page as written on `current`.
    #[must_use]
    pub fn href_from(self, current: Self) -> String {
        match (current.is_nested(), self.is_nested()) {
            (false, _) => self.path().to_owned(),
            (true, false) => format!("../{}", self.path()),
            (true, true) => self
                .path()
                .strip_prefix(PAGES_DIR)
                .unwrap_or(self.path())
                .to_owned(),
        }
    }

    /// Look a page up by its root-relative path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|page| path == page.path() || path.ends_with(&format!("/{}", page.path())))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Rewrite an asset path so it resolves from `current`.
///
/// Nested pages get a `../` prefix. Paths that already climb out with `../`,
/// absolute `http` URLs and empty paths are left alone.
#[must_use]
pub fn fix_path(path: &str, current: Page) -> String {
    if path.is_empty() || !current.is_nested() || path.starts_with("../") || path.starts_with("http")
    {
        return path.to_owned();
    }
    format!("../{path}")
}
