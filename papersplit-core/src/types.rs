use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ===== REGIONS =====
// A paper is cut into at most three regions, always in this order:
// main body, then backmatter, then appendix.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Main,
    Backmatter,
    Appendix,
}

impl Region {
    /// Label used in the synthesized `# <title> - <Label>` heading
    pub fn label(&self) -> &'static str {
        match self {
            Region::Main => "Main",
            Region::Backmatter => "Backmatter",
            Region::Appendix => "Appendix",
        }
    }
}

/// Category tag carried by every heading pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingCategory {
    Backmatter,
    Appendix,
}

impl HeadingCategory {
    pub fn name(&self) -> &'static str {
        match self {
            HeadingCategory::Backmatter => "backmatter",
            HeadingCategory::Appendix => "appendix",
        }
    }
}

/// Start offsets of the backmatter and appendix regions.
///
/// Offsets are byte offsets into the document and always sit at the start of
/// a line. `None` means the region is not present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoundaries {
    pub backmatter_start: Option<usize>,
    pub appendix_start: Option<usize>,
}

impl SectionBoundaries {
    pub fn new(backmatter_start: Option<usize>, appendix_start: Option<usize>) -> Self {
        Self {
            backmatter_start,
            appendix_start,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.backmatter_start.is_none() && self.appendix_start.is_none()
    }
}

/// Assembled output text for each region.
///
/// `main` is always present (possibly empty); the other two are `None`
/// whenever their slice came out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSegments {
    pub main: String,
    pub backmatter: Option<String>,
    pub appendix: Option<String>,
}

impl SplitSegments {
    pub fn get(&self, region: Region) -> Option<&str> {
        match region {
            Region::Main => Some(self.main.as_str()),
            Region::Backmatter => self.backmatter.as_deref(),
            Region::Appendix => self.appendix.as_deref(),
        }
    }

    /// Regions in output order, present ones only
    pub fn present(&self) -> Vec<(Region, &str)> {
        [Region::Main, Region::Backmatter, Region::Appendix]
            .into_iter()
            .filter_map(|region| self.get(region).map(|text| (region, text)))
            .collect()
    }
}

/// Result of the pure split pipeline on one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitDocument {
    pub title: String,
    pub boundaries: SectionBoundaries,
    pub segments: SplitSegments,
}

/// One file written (or planned, in dry-run mode) for a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenSegment {
    pub region: Region,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Everything a split run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub input: PathBuf,
    pub input_sha256: String,
    pub title: String,
    pub boundaries: SectionBoundaries,
    pub written: Vec<WrittenSegment>,
    /// Regions that were not found in the document
    pub missing: Vec<Region>,
}

impl SplitOutcome {
    pub fn written_for(&self, region: Region) -> Option<&WrittenSegment> {
        self.written.iter().find(|segment| segment.region == region)
    }
}
