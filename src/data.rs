// src/data.rs
//! Records produced by the page specs. Built once per parse, read-only after.

use image::DynamicImage;

use crate::config::FormatOptions;
use crate::format;

#[derive(Clone, Debug, PartialEq)]
pub struct Author {
    name: String,
    brief_introduction: Option<String>,
    image: Option<DynamicImage>,
}

impl Author {
    pub fn new(
        name: impl Into<String>,
        brief_introduction: Option<String>,
        image: Option<DynamicImage>,
    ) -> Self {
        Self { name: name.into(), brief_introduction, image }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brief_introduction(&self) -> Option<&str> {
        self.brief_introduction.as_deref()
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn into_image(self) -> Option<DynamicImage> {
        self.image
    }
}

/// Author of a poem: fetched up front, or just the id for a later lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthorRef {
    Resolved(Author),
    Id(String),
}

impl AuthorRef {
    pub fn resolved(&self) -> Option<&Author> {
        match self {
            AuthorRef::Resolved(a) => Some(a),
            AuthorRef::Id(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            AuthorRef::Resolved(_) => None,
            AuthorRef::Id(id) => Some(id.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Poetry {
    title: String,
    content: String,
    translation: Option<String>,
    notes: Option<String>,
    author: AuthorRef,
}

impl Poetry {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        translation: Option<String>,
        notes: Option<String>,
        author: AuthorRef,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            translation,
            notes,
            author,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn author(&self) -> &AuthorRef {
        &self.author
    }

    /// Body split into sentences.
    ///
    /// Note that `FormatOptions::default()` filters parentheticals, the same
    /// default `prettify` uses. For the raw split with annotations kept, pass
    /// `FormatOptions::default().keep_parentheticals()`.
    pub fn sentences(&self, opts: &FormatOptions) -> Vec<String> {
        format::sentences(&self.content, &opts.delimiters, opts.filter_parentheticals)
    }

    pub fn prettify(&self, opts: &FormatOptions) -> String {
        format::prettify(self, &opts.delimiters, opts.filter_parentheticals, opts.fill_length)
    }
}
