use crate::error::SplitError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_backmatter_patterns() -> Vec<String> {
    vec![
        r"^#+\s+(Acknowledgments?)\b".to_string(),
        r"^#+\s+(Acknowledgements?)\b".to_string(),
        r"^#+\s+Author\s+(Contributions|contributions)".to_string(),
        r"^#+\s+Funding".to_string(),
        r"^#+\s+Impact\s+(Statement|statement)".to_string(),
        r"^#+\s+Broader\s+(Impact|impact)".to_string(),
        r"^#+\s+Societal\s+(Impact|impact)".to_string(),
        r"^#+\s+Ethical\s+(Considerations|considerations)".to_string(),
    ]
}

fn default_appendix_patterns() -> Vec<String> {
    vec![
        r"^#+\s+(Appendix|Appendices|appendix|appendices)\b".to_string(),
        r"^#+\s+(Supplementary|Supporting|supplementary|supporting)\s+(Material|Materials|Information|Data|material|materials|information|data)".to_string(),
        r"^#+\s+(Supplemental|supplemental)\s+".to_string(),
        r"^#+\s+SI\s+".to_string(),
        r"^#+\s+S\d+\.\s+".to_string(), // S1., S2., ... supplementary numbering
    ]
}

fn default_guarded_appendix_patterns() -> Vec<String> {
    vec![
        r"^#+\s+A\s+".to_string(),   // "A Proofs"
        r"^#+\s+A\.\s+".to_string(), // "A. Proofs"
    ]
}

fn default_page_marker_pattern() -> String {
    r"^#{3,4}\s+Page\s+\d+\s*$".to_string()
}

fn default_lookback_lines() -> usize {
    4
}

fn default_title_placeholder() -> String {
    "Untitled_Paper".to_string()
}

fn default_backmatter_suffix() -> String {
    "_backmatter".to_string()
}

fn default_appendix_suffix() -> String {
    "_appendix".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub section_patterns: SectionPatternsConfig,
    #[serde(default)]
    pub page_markers: PageMarkerConfig,
    #[serde(default)]
    pub title: TitleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Heading regexes per category. All are compiled case-insensitive and
/// multi-line, so `^` anchors at every line start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPatternsConfig {
    #[serde(default = "default_backmatter_patterns")]
    pub backmatter: Vec<String>,
    #[serde(default = "default_appendix_patterns")]
    pub appendix: Vec<String>,
    /// Generic appendix headings only trusted when they appear after a
    /// backmatter heading
    #[serde(default = "default_guarded_appendix_patterns")]
    pub guarded_appendix: Vec<String>,
}

impl Default for SectionPatternsConfig {
    fn default() -> Self {
        Self {
            backmatter: default_backmatter_patterns(),
            appendix: default_appendix_patterns(),
            guarded_appendix: default_guarded_appendix_patterns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMarkerConfig {
    /// Matched against one line at a time, case-insensitive
    #[serde(default = "default_page_marker_pattern")]
    pub pattern: String,
    /// How many lines above a heading are searched for a page marker
    #[serde(default = "default_lookback_lines")]
    pub lookback_lines: usize,
}

impl Default for PageMarkerConfig {
    fn default() -> Self {
        Self {
            pattern: default_page_marker_pattern(),
            lookback_lines: default_lookback_lines(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Used when neither a level-1 heading nor a `title={...}` field exists
    #[serde(default = "default_title_placeholder")]
    pub placeholder: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            placeholder: default_title_placeholder(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_backmatter_suffix")]
    pub backmatter_suffix: String,
    #[serde(default = "default_appendix_suffix")]
    pub appendix_suffix: String,
    /// File extension without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            backmatter_suffix: default_backmatter_suffix(),
            appendix_suffix: default_appendix_suffix(),
            extension: default_extension(),
        }
    }
}

impl SplitConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: SplitConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                eprintln!("⚠️  Failed to load config from {}, using defaults ({e:#})", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject settings that would make region files overwrite each other
    pub fn validate(&self) -> Result<(), SplitError> {
        let output = &self.output;
        if output.extension.trim().is_empty() {
            return Err(SplitError::Config("output.extension must not be empty".to_string()));
        }
        if output.backmatter_suffix.is_empty()
            || output.appendix_suffix.is_empty()
            || output.backmatter_suffix == output.appendix_suffix
        {
            return Err(SplitError::Config(format!(
                "output suffixes must be distinct and non-empty (backmatter '{}', appendix '{}')",
                output.backmatter_suffix, output.appendix_suffix
            )));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
