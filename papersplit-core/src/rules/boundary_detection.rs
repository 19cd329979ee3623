use super::page_markers::absorb_page_marker;
use super::patterns::{HeadingPattern, PatternSet};
use crate::types::{HeadingCategory, SectionBoundaries};

// BoundaryLocator - finds where backmatter and appendix begin in a paper.
//
// Runs in two phases because the guarded appendix patterns depend on the
// backmatter result:
//   1. backmatter candidate (earliest match over all backmatter patterns)
//   2. appendix candidate (earliest match, guarded patterns must follow 1.)
// Both are then pulled back onto nearby page markers, and a backmatter
// boundary that does not precede the appendix is recomputed inside the
// pre-appendix text.
pub struct BoundaryLocator<'a> {
    patterns: &'a PatternSet,
}

impl<'a> BoundaryLocator<'a> {
    pub fn new(patterns: &'a PatternSet) -> Self {
        Self { patterns }
    }

    pub fn locate(&self, document: &str) -> SectionBoundaries {
        let raw_backmatter = self.find_backmatter(document);
        let raw_appendix = self.find_appendix(document, raw_backmatter);

        let backmatter = raw_backmatter.map(|offset| absorb_page_marker(document, offset, self.patterns));
        let appendix = raw_appendix.map(|offset| absorb_page_marker(document, offset, self.patterns));

        let backmatter = self.correct_ordering(document, backmatter, appendix);

        log::debug!(
            "Located boundaries: backmatter={:?}, appendix={:?}",
            backmatter,
            appendix
        );
        SectionBoundaries::new(backmatter, appendix)
    }

    /// Earliest backmatter heading in `text`, before page-marker absorption
    pub fn find_backmatter(&self, text: &str) -> Option<usize> {
        earliest_candidate(
            self.patterns.patterns_for(HeadingCategory::Backmatter),
            text,
            None,
        )
    }

    /// Earliest appendix heading in `text`, before page-marker absorption.
    ///
    /// `backmatter_start` is the raw backmatter candidate; guarded patterns
    /// are skipped without one.
    pub fn find_appendix(&self, text: &str, backmatter_start: Option<usize>) -> Option<usize> {
        earliest_candidate(
            self.patterns.patterns_for(HeadingCategory::Appendix),
            text,
            backmatter_start,
        )
    }

    /// Drop a backmatter boundary that does not come before the appendix.
    ///
    /// Such a match is an acknowledgments heading inside the appendix. The
    /// backmatter search is rerun on `document[..appendix_start]` and the new
    /// match (if any) gets its own page-marker absorption. The appendix
    /// boundary is never touched, so applying this twice changes nothing.
    pub fn correct_ordering(
        &self,
        document: &str,
        backmatter_start: Option<usize>,
        appendix_start: Option<usize>,
    ) -> Option<usize> {
        match (backmatter_start, appendix_start) {
            (Some(backmatter), Some(appendix)) if backmatter >= appendix => {
                log::debug!(
                    "Backmatter at {} does not precede appendix at {}; searching before the appendix",
                    backmatter,
                    appendix
                );
                let restricted = &document[..appendix];
                self.find_backmatter(restricted)
                    .map(|offset| absorb_page_marker(restricted, offset, self.patterns))
            }
            _ => backmatter_start,
        }
    }
}

/// Minimum start offset over the first match of every pattern.
///
/// A guarded pattern only counts when its match lies strictly after
/// `backmatter_start`.
fn earliest_candidate(
    patterns: &[HeadingPattern],
    text: &str,
    backmatter_start: Option<usize>,
) -> Option<usize> {
    patterns
        .iter()
        .filter_map(|pattern| {
            let start = pattern.first_match(text)?;
            if pattern.guarded {
                match backmatter_start {
                    Some(backmatter) if start > backmatter => {}
                    _ => {
                        log::trace!(
                            "Rejected guarded {} match '{}' at {}",
                            pattern.category.name(),
                            pattern.regex.as_str(),
                            start
                        );
                        return None;
                    }
                }
            }
            log::trace!(
                "{} pattern '{}' first matches at {}",
                pattern.category.name(),
                pattern.regex.as_str(),
                start
            );
            Some(start)
        })
        .min()
}

/// Locate boundaries with the built-in patterns
pub fn locate(document: &str) -> SectionBoundaries {
    let patterns = PatternSet::default();
    BoundaryLocator::new(&patterns).locate(document)
}
