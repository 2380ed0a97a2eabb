// src/config/options.rs
use std::time::Duration;

use super::consts::*;

/// Knobs for `format::sentences` / `format::prettify`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub delimiters: Vec<char>,
    pub filter_parentheticals: bool,
    /// Added to the mean sentence width when centering title/author lines.
    pub fill_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            filter_parentheticals: true,
            fill_length: DEFAULT_FILL_LENGTH,
        }
    }
}

impl FormatOptions {
    /// Delimiters given as a string, one char each (e.g. `"，。"`).
    pub fn with_delimiters(mut self, delims: &str) -> Self {
        self.delimiters = delims.chars().collect();
        self
    }

    pub fn with_fill_length(mut self, fill_length: usize) -> Self {
        self.fill_length = fill_length;
        self
    }

    pub fn keep_parentheticals(mut self) -> Self {
        self.filter_parentheticals = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
        }
    }
}
