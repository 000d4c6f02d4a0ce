//! Read-only mapping of account pages to the paths they're served at.
//!
//! A [`Registry`] is built once, usually from [`Config`], and then shared
//! freely between consumers. It has no mutating methods; the only way to get
//! a different mapping is to build a new registry.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Formatter;
use std::sync::OnceLock;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserializer, Serializer};
use strum::EnumCount;
use url::Url;

use crate::error::{ErrorKind, Result};
use crate::{Config, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    /// Normalized mount base, either empty or `/segment[/segment..]`.
    base: String,
    /// Full paths indexed by page discriminant.
    paths: [String; Page::COUNT],
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates the canonical registry, serving every page at its canonical
    /// path.
    pub fn new() -> Self {
        Self {
            base: String::new(),
            paths: Page::ALL.map(|page| page.path().to_string()),
        }
    }

    /// Creates a registry with all the pages mounted under `base`.
    ///
    /// The base is normalized: surrounding slashes are optional and an empty
    /// base (or a lone `/`) results in the canonical registry.
    pub fn with_base(base: impl AsRef<str>) -> Result<Self> {
        let base = normalize_base(base.as_ref())?;
        tracing::debug!(base = %base, "building page registry");
        Ok(Self {
            paths: Page::ALL.map(|page| format!("{}{}", base, page.path())),
            base,
        })
    }

    /// Creates a registry based on the `pages` section of the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Self::with_base(&config.pages.base)?;
        if registry.base.is_empty() {
            tracing::info!("account pages mounted at root");
        } else {
            tracing::info!("account pages mounted at {}", registry.base);
        }
        Ok(registry)
    }

    /// Process-wide canonical registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Path at which the page is served.
    pub fn get(&self, page: Page) -> &str {
        &self.paths[page as usize]
    }

    /// Path of the page with the given symbolic name.
    pub fn lookup(&self, name: &str) -> Result<&str> {
        Page::from_name(name).map(|page| self.get(page))
    }

    /// Finds the page served at `path`. Query string and fragment are
    /// ignored, everything else must match exactly.
    pub fn resolve(&self, path: &str) -> Result<Page> {
        let bare = path
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        self.iter()
            .find(|(_, p)| *p == bare)
            .map(|(page, _)| page)
            .ok_or_else(|| ErrorKind::PathNotFound(path.to_string()).into())
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Page, &str)> + '_ {
        Page::iter().map(move |page| (page, self.get(page)))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Lists `(name, path)` pairs in canonical order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(page, path)| (page.name().to_string(), path.to_string()))
            .collect()
    }

    /// Rebuilds a registry from `(name, path)` pairs.
    ///
    /// Every page must be listed exactly once and all paths must share the
    /// same base in front of their canonical path. Listing a page twice is
    /// rejected, even with the same path.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut found = BTreeMap::new();
        let mut seen_paths = HashSet::new();
        let mut base: Option<String> = None;

        for (name, path) in pairs {
            let page = Page::from_name(name.as_ref())?;
            let path = path.as_ref();
            validate_path(path)?;

            if found.contains_key(&page) {
                return Err(ErrorKind::DuplicatePage(page.name().to_string()).into());
            }
            if !seen_paths.insert(path.to_string()) {
                return Err(ErrorKind::DuplicatePath(path.to_string()).into());
            }

            let prefix = path
                .strip_suffix(page.path())
                .ok_or_else(|| ErrorKind::BaseMismatch(path.to_string()))?;
            match &base {
                Some(b) if b != prefix => {
                    return Err(ErrorKind::BaseMismatch(path.to_string()).into())
                }
                Some(_) => (),
                None => base = Some(prefix.to_string()),
            }

            found.insert(page, path.to_string());
        }

        if let Some(missing) = Page::iter().find(|page| !found.contains_key(page)) {
            return Err(ErrorKind::MissingPage(missing.name().to_string()).into());
        }

        Self::with_base(base.unwrap_or_default())
    }

    /// Path of the page followed by an url-encoded query string.
    ///
    /// ```
    /// use accounts::{Page, Registry};
    ///
    /// let link = Registry::new().link(Page::Login, &[("redir", "/credentials")]);
    /// assert_eq!(link, "/login?redir=%2Fcredentials");
    /// ```
    pub fn link(&self, page: Page, query: &[(&str, &str)]) -> String {
        let path = self.get(page);
        if query.is_empty() {
            return path.to_string();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        format!("{path}?{query}")
    }

    /// Absolute url of the page on the given origin.
    pub fn url(&self, page: Page, origin: &Url) -> Result<Url> {
        Ok(origin.join(self.get(page))?)
    }
}

/// Checks that the path is absolute, has no trailing slash, no empty
/// segments, and carries neither a query nor a fragment.
///
/// Router capture syntax (`:param`, `*rest`, `{param}`) is rejected too, the
/// registry only holds literal paths.
fn validate_path(path: &str) -> Result<()> {
    let valid = path.starts_with('/')
        && !path.ends_with('/')
        && !path.contains("//")
        && !path.contains(|c: char| {
            matches!(c, '?' | '#' | ':' | '*' | '{' | '}') || c.is_whitespace()
        });
    if valid {
        Ok(())
    } else {
        Err(ErrorKind::InvalidPath(path.to_string()).into())
    }
}

fn normalize_base(base: &str) -> Result<String> {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let base = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    validate_path(&base)?;
    Ok(base)
}

impl serde::Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (page, path) in self.iter() {
            map.serialize_entry(page.name(), path)?;
        }
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = Registry;

            fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
                f.write_str("a map of page names to paths")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Registry, A::Error> {
                // Collected as a list so that repeated keys get rejected
                // instead of silently overwritten.
                let mut pairs = Vec::new();
                while let Some((name, path)) = access.next_entry::<String, String>()? {
                    pairs.push((name, path));
                }
                Registry::from_pairs(pairs).map_err(|e| serde::de::Error::custom(e.kind))
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}
