// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use html::Node;
pub use net::{Fetch, Page, Session};
