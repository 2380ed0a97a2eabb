// src/core/html.rs
//! Tree access for the page specs.
//!
//! Specs never touch `scraper` directly; they walk pages through [`Node`],
//! which keeps them testable against any tree that can answer four questions:
//! first match, all matches, text, attribute.

use std::borrow::Cow;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

pub trait Node<'a>: Copy + Sized {
    /// First descendant matching a CSS selector, in document order.
    fn find(self, css: &str) -> Option<Self>;
    /// All descendants matching a CSS selector, in document order.
    fn find_all(self, css: &str) -> Vec<Self>;
    /// Concatenated text of all descendant text nodes, untouched.
    fn get_text(self) -> String;
    fn get_attr(self, name: &str) -> Option<&'a str>;

    fn has(self, css: &str) -> bool {
        self.find(css).is_some()
    }
}

impl<'a> Node<'a> for ElementRef<'a> {
    fn find(self, css: &str) -> Option<Self> {
        let sel = selector(css)?;
        self.select(&sel).next()
    }

    fn find_all(self, css: &str) -> Vec<Self> {
        match selector(css) {
            Some(sel) => self.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    fn get_text(self) -> String {
        self.text().collect()
    }

    fn get_attr(self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }
}

/// Parse a whole page. Raw `\r` is re-encoded as `&#13;` first: the tokenizer
/// folds raw CR into LF, but the specs cut text at CR.
pub fn parse(doc: &str) -> Html {
    let doc = if doc.contains('\r') {
        Cow::Owned(doc.replace('\r', "&#13;"))
    } else {
        Cow::Borrowed(doc)
    };
    Html::parse_document(&doc)
}

// Selectors are compile-time literals in the specs; a parse failure is a typo.
fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(css, error = %e, "invalid selector");
            None
        }
    }
}
