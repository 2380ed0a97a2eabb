// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific scraping specifications for gushiwen. Each spec encodes
//! *where the ground truth lives in the HTML* and *how to extract it*.
//!
//! ## What lives here
//! - **Pure tree walking** over an already parsed page, through `core::html::Node`.
//! - **Selector choice and fallbacks** per field, with the fatal/non-fatal policy
//!   stated next to each field.
//! - **Light shaping** of results into `data::{Author, Poetry}` or id lists.
//!
//! ## What does **not** live here
//! - **Networking**: pages arrive as text; the only calls out are the image
//!   download (`Fetch`) and the author lookup (`AuthorLookup`), both injected.
//! - **Layout**: `format` reflows text; specs return it raw.
//!
//! ## Typical call chain
//! ```text
//! CLI → Scraper::poetry(id) → Fetch::get_page → html::parse
//!                          ↘ specs::locate → specs::poetry::extract
//!                                          ↘ AuthorLookup (eager only)
//! ```
//!
//! ## Conventions & invariants
//! - Every spec starts from [`locate`]. Unknown ids render the generic landing
//!   page with HTTP 200, so the missing content column is the not-found signal.
//! - Required fields missing → `Malformed` (the template moved).
//! - Listing items that don't parse are skipped, not reported.
//!
//! ## Testing notes
//! Specs are tested offline against inline fixtures shaped like the live pages.
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::Node;
use crate::data::Author;
use crate::error::{Result, ScrapeError};

pub mod author;
pub mod poetry;

static AUTHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/authorv_(.*)\.aspx").expect("static regex")
});

static POETRY_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/shiwenv_(.*)\.aspx").expect("static regex")
});

/// Content column of any page: `div.main3 > … div.left`.
pub fn locate<'a, N: Node<'a>>(root: N) -> Result<N> {
    root.find("div.main3")
        .and_then(|main| main.find("div.left"))
        .ok_or_else(|| ScrapeError::not_found("content column (div.main3 div.left)"))
}

/// Which anchor in a `sonspic` block's `div.cont` links to the author.
///
/// When the block carries a portrait (`div.divimg`), the portrait's own link
/// comes first and the author link is second. Site-template coupling: keep all
/// knowledge of it here.
pub fn anchor_index(image_present: bool) -> usize {
    if image_present { 1 } else { 0 }
}

/// The author link inside a `div.sonspic` block, if the template has one.
pub(crate) fn sonspic_author_href<'a, N: Node<'a>>(sonspic: N) -> Option<&'a str> {
    let cont = sonspic.find("div.cont")?;
    let idx = anchor_index(sonspic.has("div.divimg"));
    let anchors = cont.find_all("a");
    let href = anchors.get(idx)?.get_attr("href");
    if href.is_none() {
        debug!(idx, "sonspic anchor without href");
    }
    href
}

pub fn author_id_from_href(href: &str) -> Option<String> {
    capture_id(&AUTHOR_HREF, href)
}

pub fn poetry_id_from_href(href: &str) -> Option<String> {
    capture_id(&POETRY_HREF, href)
}

fn capture_id(re: &Regex, href: &str) -> Option<String> {
    re.captures(href)
        .and_then(|c| c.get(1))
        .map(|m| s!(m.as_str()))
}

/// Resolves an author id to a full record (a fetch plus `author::extract`).
pub trait AuthorLookup {
    fn lookup(&self, author_id: &str) -> Result<Author>;
}

/// How `poetry::extract` fills in the author.
#[derive(Clone, Copy)]
pub enum Resolution<'a> {
    /// Keep the raw id.
    Lazy,
    /// Fetch the author now and embed it.
    Eager(&'a dyn AuthorLookup),
}
