//! Defensive selection helpers shared by all extractors
//!
//! Missing sub-elements are normal on live menu pages, so every lookup here
//! returns an `Option` and the caller decides on the sentinel.

use crate::ExtractionError;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

/// Compiles a CSS selector, reporting which one was malformed
pub fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collapses runs of whitespace to a single space and trims the ends
pub fn clean_text(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ").into_owned()
}

/// All text below `element`, cleaned; `None` when it is blank
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = clean_text(&element.text().collect::<String>());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of the first descendant matching `selector`; `None` when absent or blank
pub fn text_of(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().and_then(element_text)
}

/// Text of the first descendant matching `selector`, or `default`
pub fn text_or(element: ElementRef<'_>, selector: &Selector, default: &str) -> String {
    text_of(element, selector).unwrap_or_else(|| default.to_string())
}

/// Attribute of the first descendant matching `selector`; `None` when absent or blank
pub fn attr_of(element: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(html: &Html) -> ElementRef<'_> {
        html.root_element()
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Teen\n   Burger\t "), "Teen Burger");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_text_of_nested_markup() {
        let html = Html::parse_fragment(r#"<h3 class="t"> Mama <b>Burger</b> </h3>"#);
        let sel = compile(".t").unwrap();
        assert_eq!(text_of(root(&html), &sel), Some("Mama Burger".to_string()));
    }

    #[test]
    fn test_blank_text_is_none() {
        let html = Html::parse_fragment(r#"<span class="price">   </span>"#);
        let sel = compile(".price").unwrap();
        assert_eq!(text_of(root(&html), &sel), None);
        assert_eq!(text_or(root(&html), &sel, "N/A"), "N/A");
    }

    #[test]
    fn test_attr_of() {
        let html = Html::parse_fragment(r#"<div><img src=" /a.png "><img></div>"#);
        let img = compile("img").unwrap();
        assert_eq!(attr_of(root(&html), &img, "src"), Some("/a.png".to_string()));
        assert_eq!(attr_of(root(&html), &img, "alt"), None);
    }

    #[test]
    fn test_invalid_selector_reported() {
        let err = compile("..broken[").unwrap_err();
        assert!(matches!(err, ExtractionError::Selector { .. }));
    }
}
