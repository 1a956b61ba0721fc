//! Capability interface over a rendered page element.
//!
//! The extractor never touches `scraper` types directly; it only needs the
//! handful of queries below, so any page representation that can answer them
//! (live document, saved snapshot, test fixture) can be extracted from.

use scraper::{ElementRef, Selector};

/// A handle to one element of a rendered page.
pub trait CardNode: Copy {
    /// Returns the first descendant matching `selector`, if any.
    fn select_first(&self, selector: &Selector) -> Option<Self>;

    /// Returns the immediate parent element.
    fn parent_element(&self) -> Option<Self>;

    /// Returns the lowercase tag name.
    fn tag_name(&self) -> &str;

    /// Reads an attribute value.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Returns the text as a browser would render it: whitespace runs
    /// collapsed to a single space and trimmed.
    fn rendered_text(&self) -> String;

    /// Returns only the element's direct text, trimmed. Text inside child
    /// elements is left out.
    fn own_text(&self) -> String;
}

impl<'a> CardNode for ElementRef<'a> {
    fn select_first(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn rendered_text(&self) -> String {
        collapse_whitespace(&self.text().collect::<String>())
    }

    fn own_text(&self) -> String {
        let text: String =
            self.children().filter_map(|child| child.value().as_text()).map(|t| &**t).collect();
        text.trim().to_string()
    }
}

/// Collapses every whitespace run into one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
