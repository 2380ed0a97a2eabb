// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod format;
pub mod log;
pub mod login;
pub mod scrape;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{Author, AuthorRef, Poetry};
pub use error::{Result, ScrapeError};
pub use scrape::Scraper;
