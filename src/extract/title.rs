//! Title lookup within a product card.

use super::error::ExtractionError;
use super::node::CardNode;
use crate::amazon::selectors::search;
use std::fmt;
use tracing::trace;

/// Ways of finding the title heading, tried in [`TitleStrategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStrategy {
    /// Heading inside the title recipe block.
    TitleRecipe,
    /// First heading anywhere in the card.
    AnyHeading,
}

impl TitleStrategy {
    /// Precedence of title strategies, most specific first.
    pub const ORDER: [TitleStrategy; 2] = [TitleStrategy::TitleRecipe, TitleStrategy::AnyHeading];

    /// Finds the heading element this strategy points at.
    pub fn find_heading<N: CardNode>(self, card: &N) -> Option<N> {
        match self {
            TitleStrategy::TitleRecipe => {
                card.select_first(&search::TITLE_RECIPE)?.select_first(&search::HEADING)
            }
            TitleStrategy::AnyHeading => card.select_first(&search::HEADING),
        }
    }
}

impl fmt::Display for TitleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleStrategy::TitleRecipe => write!(f, "title-recipe"),
            TitleStrategy::AnyHeading => write!(f, "any-heading"),
        }
    }
}

/// The heading that carries a card's title, with its rendered text.
#[derive(Debug, Clone)]
pub struct LocatedTitle<N> {
    pub heading: N,
    pub text: String,
    pub strategy: TitleStrategy,
}

/// Locates the title heading of a card.
///
/// A heading with no rendered text does not count as found. When no strategy
/// yields a heading the card has no title and must be skipped.
pub fn locate_title<N: CardNode>(card: &N) -> Result<LocatedTitle<N>, ExtractionError> {
    TitleStrategy::ORDER
        .into_iter()
        .find_map(|strategy| {
            let heading = strategy.find_heading(card)?;
            let text = heading.rendered_text();
            if text.is_empty() {
                trace!("Empty heading via {}, trying next strategy", strategy);
                return None;
            }
            Some(LocatedTitle { heading, text, strategy })
        })
        .ok_or(ExtractionError::NoTitle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn locate(html: &str) -> Result<(String, TitleStrategy), ExtractionError> {
        let document = Html::parse_fragment(html);
        let card = document.root_element();
        locate_title(&card).map(|t| (t.text, t.strategy))
    }

    #[test]
    fn test_title_recipe_preferred() {
        let (text, strategy) = locate(
            r#"<h2>Sponsored banner</h2>
               <div data-cy="title-recipe"><h2><span>Widget Pro</span></h2></div>"#,
        )
        .unwrap();
        assert_eq!(text, "Widget Pro");
        assert_eq!(strategy, TitleStrategy::TitleRecipe);
    }

    #[test]
    fn test_falls_back_when_recipe_missing() {
        let (text, strategy) = locate(r#"<div><h2><a href="/dp/1">Old Layout</a></h2></div>"#).unwrap();
        assert_eq!(text, "Old Layout");
        assert_eq!(strategy, TitleStrategy::AnyHeading);
    }

    #[test]
    fn test_falls_back_when_recipe_has_no_heading() {
        let (text, strategy) = locate(
            r#"<div data-cy="title-recipe"><span>brand only</span></div>
               <h2>Gadget</h2>"#,
        )
        .unwrap();
        assert_eq!(text, "Gadget");
        assert_eq!(strategy, TitleStrategy::AnyHeading);
    }

    #[test]
    fn test_text_passes_through_verbatim() {
        let (text, _) = locate(
            r#"<h2><span>Python プログラミング: 入門, 第3版 (改訂)…</span></h2>"#,
        )
        .unwrap();
        assert_eq!(text, "Python プログラミング: 入門, 第3版 (改訂)…");
    }

    #[test]
    fn test_no_heading_is_no_title() {
        let result = locate(r#"<div><span class="a-price-whole">1,000</span></div>"#);
        assert_eq!(result.unwrap_err(), ExtractionError::NoTitle);
    }

    #[test]
    fn test_empty_heading_is_no_title() {
        let result = locate("<div><h2>   </h2></div>");
        assert_eq!(result.unwrap_err(), ExtractionError::NoTitle);
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(TitleStrategy::ORDER, [TitleStrategy::TitleRecipe, TitleStrategy::AnyHeading]);
        assert_eq!(TitleStrategy::TitleRecipe.to_string(), "title-recipe");
    }
}
