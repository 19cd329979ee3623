// Heading rules for splitting a paper.
// - patterns.rs: compiled, category-tagged heading regexes and the page marker
// - boundary_detection.rs: BoundaryLocator (candidate search + ordering correction)
// - page_markers.rs: backward page-marker absorption
// - title.rs: title extraction for synthesized headings

pub mod boundary_detection;
pub mod page_markers;
pub mod patterns;
pub mod title;

pub use boundary_detection::{locate, BoundaryLocator};
pub use page_markers::absorb_page_marker;
pub use patterns::{HeadingPattern, PatternSet};
pub use title::TitleExtractor;
