// src/scrape.rs
use std::time::Instant;

use tracing::{debug, info};
use url::Url;

use crate::config::consts::{self, BASE, ROOT_REDIRECT, SEARCH_PAGES, SEARCH_PATH};
use crate::core::{Fetch, Session, html};
use crate::data::{Author, Poetry};
use crate::error::{Result, ScrapeError};
use crate::login::{self, CaptchaSolver, Credentials};
use crate::specs::{self, AuthorLookup, Resolution};

/// Fetch + spec glue. Holds the session so cookies from `login` carry over to
/// every later request.
pub struct Scraper<F: Fetch = Session> {
    fetch: F,
}

impl Scraper<Session> {
    pub fn new() -> Result<Self> {
        Ok(Self { fetch: Session::new()? })
    }
}

impl<F: Fetch> Scraper<F> {
    pub fn with_fetch(fetch: F) -> Self {
        Self { fetch }
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    pub fn login(&self, creds: &Credentials, solver: &dyn CaptchaSolver) -> Result<()> {
        login::login(&self.fetch, creds, solver)
    }

    /// Author page by id. `NotFound` if the id doesn't resolve.
    pub fn author(&self, author_id: &str) -> Result<Author> {
        let page = self.fetch.get_page(&consts::author_url(author_id))?;
        let t = Instant::now();
        let doc = html::parse(&page.body);
        let left = specs::locate(doc.root_element())?;
        let author = specs::author::extract(left, &self.fetch)?;
        debug!(author_id, elapsed = ?t.elapsed(), "parsed author page");
        Ok(author)
    }

    /// Author id for an exact name, `None` when the site knows no such author.
    pub fn search_author(&self, name: &str) -> Result<Option<String>> {
        let url = search_url(name, &[])?;
        let page = self.fetch.get_page(&url)?;
        let doc = html::parse(&page.body);
        let left = specs::locate(doc.root_element())?;
        let hit = specs::author::search(left);
        info!(query = name, hit = ?hit, "author search");
        Ok(hit)
    }

    /// Poem by id. With `resolve_author` the author page is fetched too and
    /// embedded; otherwise only its id is kept.
    pub fn poetry(&self, poetry_id: &str, resolve_author: bool) -> Result<Poetry> {
        let page = self.fetch.get_page(&consts::poetry_url(poetry_id))?;
        if page.url == ROOT_REDIRECT {
            return Err(ScrapeError::not_found(format!("poetry {poetry_id}")));
        }
        let t = Instant::now();
        let doc = html::parse(&page.body);
        let left = specs::locate(doc.root_element())?;
        let resolution = if resolve_author {
            Resolution::Eager(self)
        } else {
            Resolution::Lazy
        };
        let poetry = specs::poetry::extract(left, &page.url, resolution)?;
        debug!(poetry_id, elapsed = ?t.elapsed(), "parsed poetry page");
        Ok(poetry)
    }

    /// Poem ids matching a title, page 1 results then page 2.
    pub fn search_poetry(&self, name: &str) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for n in SEARCH_PAGES {
            let page_no = n.to_string();
            let url = search_url(name, &[("type", "title"), ("page", page_no.as_str())])?;
            let page = self.fetch.get_page(&url)?;
            let doc = html::parse(&page.body);
            match specs::locate(doc.root_element()) {
                Ok(left) => ids.extend(specs::poetry::search_page(left)),
                Err(e) => debug!(page = n, error = %e, "search page without results column"),
            }
        }
        info!(query = name, hits = ids.len(), "poetry search");
        Ok(ids)
    }
}

impl<F: Fetch> AuthorLookup for Scraper<F> {
    fn lookup(&self, author_id: &str) -> Result<Author> {
        self.author(author_id)
    }
}

/// `search.aspx?{extra}&value={name}&valuej={first char}`
fn search_url(name: &str, extra: &[(&str, &str)]) -> Result<String> {
    let Some(first) = name.chars().next() else {
        return Err(ScrapeError::InvalidInput(s!("name is empty")));
    };
    let first = first.to_string();

    let mut params: Vec<(&str, &str)> = extra.to_vec();
    params.push(("value", name));
    params.push(("valuej", first.as_str()));

    let url = Url::parse_with_params(&join!(BASE, SEARCH_PATH), &params)?;
    Ok(url.into())
}
