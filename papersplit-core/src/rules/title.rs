use crate::config::TitleConfig;
use crate::error::SplitError;
use regex::Regex;

const HEADING_TITLE: &str = r"(?m)^# (.+?)$";
const CITATION_TITLE: &str = r"title=\{([^}]*)\}";

/// Picks the paper title used in synthesized region headings
pub struct TitleExtractor {
    heading: Regex,
    citation: Regex,
    placeholder: String,
}

impl TitleExtractor {
    pub fn new(config: &TitleConfig) -> Result<Self, SplitError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| SplitError::InvalidPattern {
                kind: "title",
                pattern: pattern.to_string(),
                source,
            })
        };

        Ok(Self {
            heading: compile(HEADING_TITLE)?,
            citation: compile(CITATION_TITLE)?,
            placeholder: config.placeholder.clone(),
        })
    }

    /// First level-1 heading, else a `title={...}` citation field, else the placeholder
    pub fn extract(&self, document: &str) -> String {
        if let Some(caps) = self.heading.captures(document) {
            return caps[1].trim().to_string();
        }
        if let Some(caps) = self.citation.captures(document) {
            return caps[1].trim().to_string();
        }
        log::debug!("No title found, using placeholder '{}'", self.placeholder);
        self.placeholder.clone()
    }
}
