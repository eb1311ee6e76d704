use crate::domain::errors::{DomainError, DomainResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, str::FromStr};

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug strip pattern"));
static SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("valid slug separator pattern"));
static EDGE_HYPHENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-+|-+$").expect("valid slug edge pattern"));
static VALID_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"));

/// Derive a URL-safe base slug from free text.
///
/// Lowercases, drops everything outside `[a-z0-9]`, whitespace, `_` and `-`,
/// folds every run of separators into one hyphen and trims hyphens from both
/// ends. The result is either empty or satisfies [`is_valid_slug`].
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&stripped, "-");
    EDGE_HYPHENS.replace_all(&hyphenated, "").into_owned()
}

/// `^[a-z0-9]+(?:-[a-z0-9]+)*$`
pub fn is_valid_slug(candidate: &str) -> bool {
    VALID_SLUG.is_match(candidate)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if !is_valid_slug(&value) {
            return Err(DomainError::Validation(format!(
                "invalid slug `{value}`: use lowercase letters, digits and single hyphens"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `base-{counter}`; a suffixed valid slug is still valid.
    pub fn with_suffix(&self, counter: u64) -> Self {
        Self(format!("{}-{counter}", self.0))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Scope within which a slug must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugNamespace {
    Posts,
    Projects,
    Tags,
}

impl SlugNamespace {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Projects => "projects",
            Self::Tags => "tags",
        }
    }

    /// Prefix used when display text yields no slug characters at all.
    pub const fn fallback_prefix(self) -> &'static str {
        match self {
            Self::Posts => "post",
            Self::Projects => "project",
            Self::Tags => "tag",
        }
    }
}

impl fmt::Display for SlugNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlugNamespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posts" | "post" => Ok(Self::Posts),
            "projects" | "project" => Ok(Self::Projects),
            "tags" | "tag" => Ok(Self::Tags),
            other => Err(DomainError::Validation(format!(
                "unknown slug namespace: {other}"
            ))),
        }
    }
}
