//! Frontmatter extraction and the `ContentEntry` type.
//!
//! Content files start with a `---`-delimited YAML header followed by the
//! markup body. The header must provide `title`, `date`, `published` and
//! `tags`; anything missing or malformed fails the build for that file.

use crate::content::date::EntryDate;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const FRONTMATTER_DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("missing frontmatter block (expected leading `---`)")]
    MissingFrontmatter,

    #[error("unclosed frontmatter block (no terminating `---`)")]
    UnclosedFrontmatter,

    #[error("invalid frontmatter: {0}")]
    Yaml(String),

    #[error("missing required frontmatter field `{0}`")]
    MissingField(&'static str),
}

/// Frontmatter fields as they appear on disk, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    title: Option<String>,
    date: Option<String>,
    last_update_date: Option<String>,
    description: Option<String>,
    tags: Option<String>,
    published: Option<bool>,
    listed: Option<bool>,
}

/// One content file's validated metadata plus its body.
///
/// Immutable after construction; rebuilt from disk on every build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// URL path segment, the file's base name with extension stripped.
    pub slug: String,
    pub title: String,
    /// Raw `date` field as written in the header.
    pub date_raw: String,
    /// Parsed date; `None` when `date_raw` is not ISO-parseable.
    pub date: Option<EntryDate>,
    pub last_update: Option<EntryDate>,
    pub description: Option<String>,
    /// Comma-separated tag string, verbatim from the header.
    pub tags: String,
    pub published: bool,
    pub listed: bool,
    /// Markup body after the frontmatter block, untouched.
    pub body: String,
}

impl ContentEntry {
    /// Parse a content file into an entry. The slug comes from `path`'s
    /// file stem.
    pub fn from_source(path: &Path, source: &str) -> Result<Self, MetaError> {
        let (header, body) = split_frontmatter(source)?;

        let raw: RawMeta =
            serde_yaml::from_str(header).map_err(|err| MetaError::Yaml(err.to_string()))?;

        let title = raw.title.ok_or(MetaError::MissingField("title"))?;
        let date_raw = raw.date.ok_or(MetaError::MissingField("date"))?;
        let tags = raw.tags.ok_or(MetaError::MissingField("tags"))?;
        let published = raw.published.ok_or(MetaError::MissingField("published"))?;

        let slug = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            slug,
            title,
            date: EntryDate::parse(&date_raw),
            date_raw,
            last_update: raw.last_update_date.as_deref().and_then(EntryDate::parse),
            description: raw.description,
            tags,
            published,
            listed: raw.listed.unwrap_or(true),
            body: body.to_string(),
        })
    }

    /// Display labels for this entry's tags: the `tags` string split on `,`
    /// with each token prefixed by `#`. Tokens are not trimmed, so
    /// whitespace around commas is preserved in the label.
    pub fn tag_labels(&self) -> Vec<String> {
        if self.tags.is_empty() {
            return Vec::new();
        }
        self.tags
            .split(',')
            .map(|token| format!("#{token}"))
            .collect()
    }

    /// Year used for listing groups, `None` for unparseable dates.
    pub fn year(&self) -> Option<u16> {
        self.date.map(|d| d.year)
    }
}

/// Split source into (frontmatter header, body). The header must open on
/// the first line and close with a matching delimiter line.
fn split_frontmatter(source: &str) -> Result<(&str, &str), MetaError> {
    let rest = source
        .strip_prefix(FRONTMATTER_DELIMITER)
        .ok_or(MetaError::MissingFrontmatter)?;
    let rest = rest.strip_prefix('\n').ok_or(MetaError::MissingFrontmatter)?;

    let close = format!("\n{FRONTMATTER_DELIMITER}");
    let end = rest.find(&close).ok_or(MetaError::UnclosedFrontmatter)?;

    let header = &rest[..end];
    let body = rest[end + close.len()..].trim_start_matches('\n');

    Ok((header, body))
}
