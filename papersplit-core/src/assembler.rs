use crate::types::{Region, SectionBoundaries, SplitSegments};
use anyhow::Result;
use regex::{NoExpand, Regex};

/// Slices a document at its section boundaries and dresses each piece up
/// as a standalone Markdown file.
pub struct SegmentAssembler {
    trailing_separator: Regex,
    level_one_heading: Regex,
}

impl SegmentAssembler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            trailing_separator: Regex::new(r"---\s*\z")?,
            level_one_heading: Regex::new(r"(?m)^# .*$")?,
        })
    }

    /// `boundaries` must come from the locator, so a present backmatter
    /// offset is always below the appendix offset.
    pub fn assemble(
        &self,
        document: &str,
        boundaries: &SectionBoundaries,
        title: &str,
    ) -> SplitSegments {
        let mut working = document;
        let mut appendix = None;
        let mut backmatter = None;

        if let Some(start) = boundaries.appendix_start {
            appendix = Some(&working[start..]);
            working = &working[..start];
        }

        if let Some(start) = boundaries.backmatter_start {
            backmatter = Some(&working[start..]);
            working = &working[..start];
        }

        SplitSegments {
            main: self.finish_main(working, title),
            backmatter: backmatter.and_then(|text| self.finish_region(text, Region::Backmatter, title)),
            appendix: appendix.and_then(|text| self.finish_region(text, Region::Appendix, title)),
        }
    }

    /// Drop one trailing `---` separator and the surrounding whitespace
    pub fn clean(&self, text: &str) -> String {
        self.trailing_separator
            .replace(text, "")
            .trim()
            .to_string()
    }

    fn finish_region(&self, text: &str, region: Region, title: &str) -> Option<String> {
        let cleaned = self.clean(text);
        if cleaned.is_empty() {
            log::debug!("{} segment is empty after cleanup, dropping it", region.label());
            return None;
        }
        Some(format!("# {title} - {}\n\n---\n\n{cleaned}", region.label()))
    }

    fn finish_main(&self, text: &str, title: &str) -> String {
        let cleaned = self.clean(text);
        let heading = format!("# {title}");
        self.level_one_heading
            .replacen(&cleaned, 1, NoExpand(&heading))
            .into_owned()
    }
}
