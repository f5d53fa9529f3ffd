//! Absolutizes intra-document links in markdown.
//!
//! Registry readme pages render the snapshot under their own URL, so a
//! `[label](#fragment)` link points nowhere. The rewriter turns it into
//! `[label](<base>#fragment)` while leaving `<pre>` blocks untouched.
//!
//! ## Approach
//!
//! Two masking passes instead of a markdown parser:
//!
//! 1. Every `<pre>...</pre>` block becomes a `PREF` marker.
//! 2. Every intra-document link in what remains becomes a `LINK` marker.
//! 3. The text behind each `LINK` marker is rewritten.
//! 4. Markers are restored in reverse: links first, then blocks.
//!
//! A link-shaped string inside a `<pre>` block is already hidden behind a
//! marker by the time the link pass runs, so it is never rewritten.
//!
//! ## Limitations
//!
//! ```text
//! [a \] b](#x)      not matched: label contains `]`
//! [a](#x (y))       not matched past the first `)`
//! [multi
//! line](#x)         not matched: label spans lines
//! ```
//!
//! Unbalanced `<pre>` tags are masked from an opening tag to the first
//! closing tag after it, so `<pre>a<pre>b</pre>` is one block. Links in that
//! span stay untouched even when an earlier block repeats part of it.

use crate::error::Result;
use crate::rewrite::mask::mask;
use regex::Regex;
use std::sync::LazyLock;

/// Tag for masked `<pre>` blocks.
pub const PREFORMATTED_TAG: &str = "PREF";

/// Tag for masked intra-document links.
pub const LINK_TAG: &str = "LINK";

/// `<pre>` through the first `</pre>`, any case, across lines.
const PREFORMATTED_PATTERN: &str = r"(?is)<pre>.*?</pre>";

/// `[label](#fragment)` with no `]`, `)` or line breaks inside.
const INTRA_LINK_PATTERN: &str = r"\[[^\]\r\n]*\]\(#[^)\r\n]*\)";

static DEFAULT_REWRITER: LazyLock<LinkRewriter> =
    LazyLock::new(|| LinkRewriter::new().expect("built-in link patterns must compile"));

/// Compiled patterns for the link rewrite.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    preformatted: Regex,
    intra_link: Regex,
}

impl LinkRewriter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            preformatted: Regex::new(PREFORMATTED_PATTERN)?,
            intra_link: Regex::new(INTRA_LINK_PATTERN)?,
        })
    }

    /// Rewrites every intra-document link outside `<pre>` blocks to point at
    /// `base_href`. All other bytes are returned unchanged.
    pub fn rewrite(&self, text: &str, base_href: &str) -> String {
        let blocks = mask(text, &self.preformatted, PREFORMATTED_TAG);
        let mut links = mask(&blocks.text, &self.intra_link, LINK_TAG);

        if links.regions.is_empty() {
            log::debug!("No intra-document links found");
            return text.to_string();
        }

        log::debug!(
            "Rewriting {} distinct link(s), skipping {} <pre> block(s)",
            links.regions.len(),
            blocks.regions.len()
        );

        links.regions.rewrite(|link| absolutize(link, base_href));

        let restored = links.unmask();
        blocks.regions.unmask(&restored)
    }
}

/// Rewrites links using the built-in patterns.
///
/// ```
/// use readme_sync::rewrite::rewrite_links;
///
/// let out = rewrite_links("See [Usage](#usage)", "https://reg/-/web/detail/pkg?");
/// assert_eq!(out, "See [Usage](https://reg/-/web/detail/pkg?#usage)");
/// ```
pub fn rewrite_links(text: &str, base_href: &str) -> String {
    DEFAULT_REWRITER.rewrite(text, base_href)
}

/// Inserts `base_href` in front of the fragment of a single link.
///
/// Anchors on `](#` rather than `(#` so a label like `[step (#1)]` is not
/// touched; labels cannot contain `]`, so the first `](` is the target.
fn absolutize(link: &str, base_href: &str) -> String {
    link.replacen("](#", &format!("]({base_href}#"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://h/p?";

    #[test]
    fn test_basic_rewrite() {
        assert_eq!(rewrite_links("[A](#b)", BASE), "[A](https://h/p?#b)");
    }

    #[test]
    fn test_no_constructs_returns_input() {
        let text = "# Title\n\nJust prose with a [real link](https://x.y) and (#not) a link.\n";
        assert_eq!(rewrite_links(text, BASE), text);
    }

    #[test]
    fn test_link_inside_pre_is_untouched() {
        assert_eq!(
            rewrite_links("<pre>[X](#y)</pre>", BASE),
            "<pre>[X](#y)</pre>"
        );
    }

    #[test]
    fn test_pre_tag_is_case_insensitive() {
        let text = "<PRE>[X](#y)</Pre> [Z](#w)";
        assert_eq!(
            rewrite_links(text, BASE),
            "<PRE>[X](#y)</Pre> [Z](https://h/p?#w)"
        );
    }

    #[test]
    fn test_duplicate_links_rewritten_identically() {
        assert_eq!(
            rewrite_links("[A](#b) ... [A](#b)", BASE),
            "[A](https://h/p?#b) ... [A](https://h/p?#b)"
        );
    }

    #[test]
    fn test_mixed_content() {
        let text = "X: [L](#a) <pre>[L2](#unchanged)</pre> Y: [L](#a)";
        assert_eq!(
            rewrite_links(text, "https://reg/-/web/detail/pkg?"),
            "X: [L](https://reg/-/web/detail/pkg?#a) <pre>[L2](#unchanged)</pre> \
             Y: [L](https://reg/-/web/detail/pkg?#a)"
        );
    }

    #[test]
    fn test_multiline_pre_block() {
        let text = "[top](#top)\n<pre>\n[a](#b)\n[c](#d)\n</pre>\n[end](#end)";
        assert_eq!(
            rewrite_links(text, BASE),
            "[top](https://h/p?#top)\n<pre>\n[a](#b)\n[c](#d)\n</pre>\n[end](https://h/p?#end)"
        );
    }

    #[test]
    fn test_external_and_relative_links_untouched() {
        let text = "[ext](https://example.com#x) [rel](docs/guide.md#x) [in](#x)";
        assert_eq!(
            rewrite_links(text, BASE),
            "[ext](https://example.com#x) [rel](docs/guide.md#x) [in](https://h/p?#x)"
        );
    }

    #[test]
    fn test_conservative_pattern_skips_unusual_links() {
        let text = "[a \\] b](#x) [multi\nline](#y)";
        assert_eq!(rewrite_links(text, BASE), text);
    }

    #[test]
    fn test_label_containing_paren_hash() {
        assert_eq!(
            rewrite_links("[step (#1)](#step-1)", BASE),
            "[step (#1)](https://h/p?#step-1)"
        );
    }

    #[test]
    fn test_empty_fragment_and_label() {
        assert_eq!(rewrite_links("[](#)", BASE), "[](https://h/p?#)");
    }

    #[test]
    fn test_link_wrapping_pre_block_is_restored() {
        let text = "[<pre>x</pre>](#a)";
        assert_eq!(rewrite_links(text, BASE), "[<pre>x</pre>](https://h/p?#a)");
    }

    #[test]
    fn test_image_with_fragment_link() {
        assert_eq!(
            rewrite_links("![badge](#status)", BASE),
            "![badge](https://h/p?#status)"
        );
    }

    #[test]
    fn test_unbalanced_pre_repeating_earlier_block() {
        let text = "<pre>A</pre> <pre>[x](#y)<pre>A</pre> [z](#w)";
        assert_eq!(
            rewrite_links(text, BASE),
            "<pre>A</pre> <pre>[x](#y)<pre>A</pre> [z](https://h/p?#w)"
        );
    }
}
