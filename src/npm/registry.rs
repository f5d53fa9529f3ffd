//! Registry detail-page addresses.

use crate::error::Result;
use crate::npm::manifest::Manifest;
use std::fmt;

/// Registry used when the manifest has no `publishConfig.registry`.
pub const DEFAULT_REGISTRY: &str = "http://localhost:4873";

/// Web UI route that renders a package's readme.
pub const WEB_DETAIL_PATH: &str = "/-/web/detail/";

/// Absolute prefix that turns `#fragment` into a link on the package's
/// detail page.
///
/// The trailing `?` makes the appended `#fragment` land after an empty query
/// string, which the detail route accepts:
///
/// ```text
/// https://npm.example.com/-/web/detail/my-pkg?#usage
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseHref {
    href: String,
    text: String,
}

impl BaseHref {
    /// Builds the prefix for `package` on `registry`.
    ///
    /// Trailing slashes on `registry` are dropped so the web path is not
    /// doubled.
    pub fn new(registry: &str, package: &str) -> Self {
        let href = format!(
            "{}{WEB_DETAIL_PATH}{package}?",
            registry.trim_end_matches('/')
        );
        let text = format!("<base href=\"{href}\">");
        Self { href, text }
    }

    /// Builds the prefix from the manifest's registry (or
    /// [`DEFAULT_REGISTRY`]) and package name.
    ///
    /// The registry is used as written except for trailing slashes, which
    /// are dropped (see [`BaseHref::new`]).
    ///
    /// # Errors
    ///
    /// - `MissingPackageName`: manifest has no usable `name`
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let name = manifest.require_name()?;
        let registry = manifest.registry().unwrap_or(DEFAULT_REGISTRY);

        log::debug!("Using registry {} for package {}", registry, name);
        Ok(Self::new(registry, name))
    }

    pub fn as_str(&self) -> &str {
        &self.href
    }

    /// Printable `<base href="...">` tag.
    pub fn html_tag(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for BaseHref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

impl AsRef<str> for BaseHref {
    fn as_ref(&self) -> &str {
        &self.href
    }
}
