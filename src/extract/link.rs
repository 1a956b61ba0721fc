//! Detail-page link resolution for a located title.
//!
//! Cards attach the product link to the title in one of two ways: the link
//! wraps the heading (current layout) or the heading wraps the link (older and
//! alternate renderings). A minority of cards match neither, for those the
//! first generic card link is used. The order of [`LinkPattern::ORDER`]
//! decides ambiguous pages and is covered by tests.

use super::node::CardNode;
use crate::amazon::selectors::search;
use std::fmt;

/// A structural relationship between title heading and product link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPattern {
    /// `<a><h2>..</h2></a>`: the heading's parent is the link.
    WrapsHeading,
    /// `<h2><a>..</a></h2>`: the first link nested in the heading.
    InsideHeading,
    /// First `a.a-link-normal` anywhere in the card.
    NormalLinkFallback,
}

impl LinkPattern {
    /// Precedence of link patterns, first success wins.
    pub const ORDER: [LinkPattern; 3] =
        [LinkPattern::WrapsHeading, LinkPattern::InsideHeading, LinkPattern::NormalLinkFallback];

    /// Returns the href this pattern yields, if the pattern applies.
    ///
    /// A matching link element without a usable `href` does not satisfy
    /// the pattern.
    pub fn resolve<N: CardNode>(self, heading: &N, card: &N) -> Option<String> {
        let link = match self {
            LinkPattern::WrapsHeading => heading
                .parent_element()
                .filter(|parent| parent.tag_name().eq_ignore_ascii_case(search::LINK_TAG))?,
            LinkPattern::InsideHeading => heading.select_first(&search::ANCHOR)?,
            LinkPattern::NormalLinkFallback => card.select_first(&search::NORMAL_LINK)?,
        };

        link.attr(search::HREF_ATTR).map(str::trim).filter(|href| !href.is_empty()).map(String::from)
    }
}

impl fmt::Display for LinkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkPattern::WrapsHeading => write!(f, "wraps-heading"),
            LinkPattern::InsideHeading => write!(f, "inside-heading"),
            LinkPattern::NormalLinkFallback => write!(f, "normal-link-fallback"),
        }
    }
}

/// A link found for a title, and the pattern that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub href: String,
    pub pattern: LinkPattern,
}

/// Resolves the product link for `heading`, trying each pattern in order.
///
/// `None` means no pattern applied; callers degrade the url to empty.
pub fn resolve_link<N: CardNode>(heading: &N, card: &N) -> Option<ResolvedLink> {
    LinkPattern::ORDER.into_iter().find_map(|pattern| {
        pattern.resolve(heading, card).map(|href| ResolvedLink { href, pattern })
    })
}
