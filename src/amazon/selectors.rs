//! CSS selectors for Amazon search result pages.
//!
//! All structural markers the extractor relies on live here.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When extraction degrades, capture an HTML sample,
//! update selectors, and add it to `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Product card container - one per search result.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-component-type='s-search-result']").unwrap());

    /// Title recipe block wrapping the heading on current layouts.
    pub static TITLE_RECIPE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[data-cy='title-recipe']").unwrap());

    /// Heading-level element carrying the product title.
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

    /// Any link element.
    pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

    /// Generic card link, used when the heading carries no link.
    pub static NORMAL_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.a-link-normal").unwrap());

    /// Whole price (integer part, locale formatted).
    pub static PRICE_WHOLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".a-price-whole").unwrap());

    /// Tag name of link elements.
    pub const LINK_TAG: &str = "a";

    /// Attribute holding a link's address.
    pub const HREF_ATTR: &str = "href";
}

/// Selectors for detecting error/captcha pages.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             img[src*='captcha']",
        )
        .unwrap()
    });

    /// Dog page (Amazon's error page).
    pub static DOG_PAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img[alt*='dog'], \
             .a-box-inner a[href='/ref=cs_503_link']",
        )
        .unwrap()
    });
}
