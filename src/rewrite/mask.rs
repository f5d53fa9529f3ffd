//! Placeholder masking of regex-matched regions.
//!
//! `mask` swaps every region matched by a pattern for an opaque marker so a
//! later pass cannot see inside it. `MaskedRegions::unmask` puts the
//! original (or rewritten) text back.
//!
//! Markers look like `!TAG!LINK03!`: a fixed prefix, the caller's tag, a
//! zero-padded index and a closing `!`. The closing delimiter keeps
//! `!TAG!LINK10!` from being a prefix of `!TAG!LINK100!` once a pass
//! produces more than 99 regions.

use regex::{Captures, Regex};

/// Leading sentinel shared by every marker.
pub const MARKER_PREFIX: &str = "!TAG!";

const MARKER_SUFFIX: &str = "!";

/// One masked region: the marker and the text it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedRegion {
    pub marker: String,
    pub original: String,
}

/// Ordered marker → text mapping produced by one masking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedRegions {
    regions: Vec<MaskedRegion>,
}

/// Output of [`mask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    pub regions: MaskedRegions,
    pub text: String,
}

/// Replaces every match of `pattern` in `text` with a marker tagged `tag`.
///
/// Matches are found in one left-to-right scan of the input and each match
/// is replaced where it was found. Each distinct matched substring gets the
/// next index, so identical regions share one marker. A match that contains
/// an earlier match is still masked whole.
pub fn mask(text: &str, pattern: &Regex, tag: &str) -> Masked {
    let mut regions = MaskedRegions::default();

    let masked = pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let original = &caps[0];
            if let Some(marker) = regions.get(original) {
                return marker.to_string();
            }

            let marker = format!(
                "{MARKER_PREFIX}{tag}{index:02}{MARKER_SUFFIX}",
                index = regions.len()
            );

            log::trace!("Masked {:?} as {}", original, marker);
            regions.regions.push(MaskedRegion {
                marker: marker.clone(),
                original: original.to_string(),
            });
            marker
        })
        .into_owned();

    Masked {
        regions,
        text: masked,
    }
}

impl MaskedRegions {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaskedRegion> {
        self.regions.iter()
    }

    /// Returns the marker that stands for `original`, if any.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.original == original)
            .map(|r| r.marker.as_str())
    }

    /// Rewrites the text behind every marker in place.
    pub fn rewrite<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for region in &mut self.regions {
            region.original = f(&region.original);
        }
    }

    /// Substitutes every marker in `text` with its stored text.
    ///
    /// Highest index first, so no marker is consumed as part of a longer one.
    pub fn unmask(&self, text: &str) -> String {
        self.regions
            .iter()
            .rev()
            .fold(text.to_string(), |acc, region| {
                acc.replace(&region.marker, &region.original)
            })
    }
}

impl Masked {
    /// Restores the masked text.
    pub fn unmask(&self) -> String {
        self.regions.unmask(&self.text)
    }
}
