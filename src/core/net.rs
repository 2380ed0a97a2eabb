// src/core/net.rs
// Blocking HTTP over reqwest. Everything the specs need from the network goes
// through `Fetch`, so tests can swap in canned pages.

use std::time::Instant;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::config::SessionOptions;
use crate::error::Result;

/// A fetched document together with the URL it finally resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub body: String,
}

pub trait Fetch {
    fn get_page(&self, url: &str) -> Result<Page>;
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Page>;
}

/// Cookie-keeping client; one per logical user session.
#[derive(Clone, Debug)]
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new() -> Result<Self> {
        Self::with_options(&SessionOptions::default())
    }

    pub fn with_options(opts: &SessionOptions) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for Session {
    fn get_page(&self, url: &str) -> Result<Page> {
        let t = Instant::now();
        let resp = self.client.get(url).send()?.error_for_status()?;
        let page = into_page(resp)?;
        debug!(url, resolved = %page.url, elapsed = ?t.elapsed(), "GET page");
        Ok(page)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let t = Instant::now();
        let resp = self.client.get(url).send()?.error_for_status()?;
        let bytes = resp.bytes()?.to_vec();
        debug!(url, len = bytes.len(), elapsed = ?t.elapsed(), "GET bytes");
        Ok(bytes)
    }

    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Page> {
        let t = Instant::now();
        let resp = self.client.post(url).form(form).send()?.error_for_status()?;
        let page = into_page(resp)?;
        debug!(url, resolved = %page.url, elapsed = ?t.elapsed(), "POST form");
        Ok(page)
    }
}

// The site always serves UTF-8 but does not always say so in the headers.
fn into_page(resp: Response) -> Result<Page> {
    let url = resp.url().to_string();
    let bytes = resp.bytes()?;
    let body = String::from_utf8_lossy(&bytes).into_owned();
    Ok(Page { url, body })
}
