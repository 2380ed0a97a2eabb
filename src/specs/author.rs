// src/specs/author.rs
//! Scraping *spec* for author pages (`authorv_{id}.aspx`) and the author hit on
//! the search page.
//!
//! Page shape (content column only):
//! ```text
//! div#sonsyuanwen
//!   div.cont
//!     div.divimg > img[src]      optional portrait
//!     h1                         name
//!     p                          biography, "►N篇诗文" link appended
//! ```

use image::DynamicImage;
use tracing::{debug, warn};

use super::{author_id_from_href, sonspic_author_href};
use crate::config::consts::BRIEF_MARKER;
use crate::core::{Fetch, Node, sanitize};
use crate::data::Author;
use crate::error::{Result, ScrapeError};

/// Build an [`Author`] from the located content column.
///
/// The portrait is best effort: a failed download or decode leaves
/// `image` empty and the rest of the record intact.
pub fn extract<'a, N: Node<'a>>(left: N, fetch: &dyn Fetch) -> Result<Author> {
    let cont = left
        .find("div#sonsyuanwen")
        .and_then(|s| s.find("div.cont"))
        .ok_or_else(|| ScrapeError::not_found("no information about this author"))?;

    let image = cont
        .find("div.divimg")
        .and_then(|d| d.find("img"))
        .and_then(|img| img.get_attr("src"))
        .and_then(|src| fetch_image(fetch, src));

    let name = cont
        .find("h1")
        .map(|h| h.get_text().trim().to_string())
        .ok_or_else(|| ScrapeError::malformed("author page without h1"))?;

    let brief = cont
        .find("p")
        .map(|p| s!(sanitize::cut_at(p.get_text().trim(), BRIEF_MARKER)))
        .ok_or_else(|| ScrapeError::malformed("author page without introduction paragraph"))?;

    Ok(Author::new(name, Some(brief), image))
}

/// Author id from a search result page. `None` means no author by that
/// name, which is a normal answer.
pub fn search<'a, N: Node<'a>>(left: N) -> Option<String> {
    let Some(sonspic) = left.find("div.sonspic") else {
        debug!("search page has no author block");
        return None;
    };
    sonspic_author_href(sonspic).and_then(author_id_from_href)
}

fn fetch_image(fetch: &dyn Fetch, src: &str) -> Option<DynamicImage> {
    let bytes = match fetch.get_bytes(src) {
        Ok(b) => b,
        Err(e) => {
            warn!(src, error = %e, "portrait download failed; continuing without image");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!(src, error = %e, "portrait decode failed; continuing without image");
            None
        }
    }
}
