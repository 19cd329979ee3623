use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::types::HeadingCategory;
use regex::{Regex, RegexBuilder};

/// A category-tagged heading regex.
///
/// Guarded patterns are generic enough ("A ", "A. ") that a match is only
/// trusted when it comes after an already-located backmatter heading.
#[derive(Debug, Clone)]
pub struct HeadingPattern {
    pub category: HeadingCategory,
    pub regex: Regex,
    pub guarded: bool,
}

impl HeadingPattern {
    pub fn compile(
        category: HeadingCategory,
        pattern: &str,
        guarded: bool,
    ) -> Result<Self, SplitError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|source| SplitError::InvalidPattern {
                kind: category.name(),
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            category,
            regex,
            guarded,
        })
    }

    /// Start offset of the first match anywhere in `text`
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.regex.find(text).map(|m| m.start())
    }
}

/// Compiled heading and page-marker patterns for one run
#[derive(Debug, Clone)]
pub struct PatternSet {
    backmatter: Vec<HeadingPattern>,
    appendix: Vec<HeadingPattern>,
    page_marker: Regex,
    lookback_lines: usize,
}

impl PatternSet {
    pub fn from_config(config: &SplitConfig) -> Result<Self, SplitError> {
        let sections = &config.section_patterns;

        let backmatter = sections
            .backmatter
            .iter()
            .map(|p| HeadingPattern::compile(HeadingCategory::Backmatter, p, false))
            .collect::<Result<Vec<_>, _>>()?;

        // Guarded patterns go last so the list reads in the order it is tried
        let appendix = sections
            .appendix
            .iter()
            .map(|p| HeadingPattern::compile(HeadingCategory::Appendix, p, false))
            .chain(
                sections
                    .guarded_appendix
                    .iter()
                    .map(|p| HeadingPattern::compile(HeadingCategory::Appendix, p, true)),
            )
            .collect::<Result<Vec<_>, _>>()?;

        let page_marker = RegexBuilder::new(&config.page_markers.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| SplitError::InvalidPattern {
                kind: "page marker",
                pattern: config.page_markers.pattern.clone(),
                source,
            })?;

        Ok(Self {
            backmatter,
            appendix,
            page_marker,
            lookback_lines: config.page_markers.lookback_lines,
        })
    }

    pub fn patterns_for(&self, category: HeadingCategory) -> &[HeadingPattern] {
        match category {
            HeadingCategory::Backmatter => &self.backmatter,
            HeadingCategory::Appendix => &self.appendix,
        }
    }

    /// `line` must not contain the terminating newline
    pub fn is_page_marker(&self, line: &str) -> bool {
        self.page_marker.is_match(line)
    }

    pub fn lookback_lines(&self) -> usize {
        self.lookback_lines
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::from_config(&SplitConfig::default()).expect("Built-in section patterns must compile")
    }
}
