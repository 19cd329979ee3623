//! Fixture-driven split tests.
//!
//! Each fixture under `test_fixtures/papers/` is a small Markdown paper that
//! exercises one shape of document: a full conference paper with page
//! markers, an appendix that mentions acknowledgements, a paper whose title
//! only lives in a citation block, and a document with no regions at all.

use papersplit_core::{
    locate, PaperSplitter, Region, SectionBoundaries, SplitConfig, SplitDocument,
};
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Fixture helpers
// ============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures/papers")
}

fn load_paper(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Missing fixture: {}", path.display()))
}

fn split(name: &str) -> (String, SplitDocument) {
    let paper = load_paper(name);
    let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
    let result = splitter.split_text(&paper);
    (paper, result)
}

fn offset_of(text: &str, needle: &str) -> usize {
    text.find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not in fixture"))
}

// ============================================================================
// Boundary detection
// ============================================================================

mod boundaries {
    use super::*;

    #[test]
    fn full_paper_boundaries_absorb_page_markers() {
        let paper = load_paper("neurips_full.md");
        let boundaries = locate(&paper);

        assert_eq!(boundaries.backmatter_start, Some(offset_of(&paper, "### Page 9")));
        assert_eq!(boundaries.appendix_start, Some(offset_of(&paper, "### Page 12")));
    }

    #[test]
    fn acknowledgements_inside_appendix_are_not_backmatter() {
        let paper = load_paper("appendix_mentions_acks.md");
        let boundaries = locate(&paper);

        assert_eq!(
            boundaries,
            SectionBoundaries::new(None, Some(offset_of(&paper, "# Appendix")))
        );
    }

    #[test]
    fn funding_and_supplementary_information() {
        let paper = load_paper("bibtex_title.md");
        let boundaries = locate(&paper);

        assert_eq!(boundaries.backmatter_start, Some(offset_of(&paper, "### Page 4")));
        assert_eq!(
            boundaries.appendix_start,
            Some(offset_of(&paper, "## Supplementary Information"))
        );
    }

    #[test]
    fn generic_headings_without_backmatter_are_ignored() {
        let paper = load_paper("plain.md");
        assert!(locate(&paper).is_empty());
    }

    #[test]
    fn boundaries_are_ordered_line_starts() {
        for name in [
            "neurips_full.md",
            "appendix_mentions_acks.md",
            "bibtex_title.md",
            "plain.md",
        ] {
            let paper = load_paper(name);
            let boundaries = locate(&paper);

            for offset in [boundaries.backmatter_start, boundaries.appendix_start]
                .into_iter()
                .flatten()
            {
                assert!(offset < paper.len(), "{name}: offset {offset} out of range");
                assert!(
                    offset == 0 || paper.as_bytes()[offset - 1] == b'\n',
                    "{name}: offset {offset} is not a line start"
                );
            }

            if let (Some(backmatter), Some(appendix)) =
                (boundaries.backmatter_start, boundaries.appendix_start)
            {
                assert!(backmatter < appendix, "{name}: backmatter after appendix");
            }
        }
    }
}

// ============================================================================
// Assembled segments
// ============================================================================

mod segments {
    use super::*;

    #[test]
    fn full_paper_has_three_regions() {
        let (_, result) = split("neurips_full.md");
        let segments = &result.segments;

        assert_eq!(result.title, "Sparse Attention Is Enough");
        assert!(segments.main.starts_with("#### Page 1\n\n# Sparse Attention Is Enough\n"));
        assert!(segments.main.ends_with("within 0.3 points of dense attention."));

        let backmatter = segments.backmatter.as_deref().unwrap();
        assert!(backmatter.starts_with(
            "# Sparse Attention Is Enough - Backmatter\n\n---\n\n### Page 9\n\n## Acknowledgments"
        ));
        assert!(backmatter.contains("## Broader Impact"));
        assert!(backmatter.ends_with("Attention is all you need. 2017."));

        let appendix = segments.appendix.as_deref().unwrap();
        assert!(appendix.starts_with(
            "# Sparse Attention Is Enough - Appendix\n\n---\n\n### Page 12\n\n## A Proofs"
        ));
        assert!(appendix.ends_with("More tables."));
    }

    #[test]
    fn regions_cover_the_whole_paper() {
        let (paper, result) = split("neurips_full.md");

        // Every non-blank body line lands in exactly one region
        let joined = result
            .segments
            .present()
            .into_iter()
            .map(|(_, text)| text.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        for line in paper.lines().filter(|l| !l.trim().is_empty() && *l != "---") {
            assert!(joined.contains(line), "line lost during split: {line}");
        }
    }

    #[test]
    fn appendix_keeps_its_acknowledgements() {
        let (_, result) = split("appendix_mentions_acks.md");

        assert!(result.segments.backmatter.is_none());
        assert_eq!(result.segments.main.lines().next(), Some("# Protein Folding at Scale"));
        let appendix = result.segments.appendix.unwrap();
        assert!(appendix.contains("## Acknowledgements of Data Providers"));
    }

    #[test]
    fn citation_title_names_synthesized_headings() {
        let (_, result) = split("bibtex_title.md");

        assert_eq!(result.title, "Graph Neural Networks for Tabular Data");
        // No level-1 heading in the body, so main keeps its first line
        assert!(result.segments.main.starts_with("@inproceedings{lee2024graphs,"));
        assert!(result
            .segments
            .backmatter
            .unwrap()
            .starts_with("# Graph Neural Networks for Tabular Data - Backmatter"));
        assert!(result.segments.appendix.unwrap().contains("### S1. Hyperparameters"));
    }

    #[test]
    fn plain_paper_is_only_main() {
        let (paper, result) = split("plain.md");

        assert_eq!(result.segments.main, paper.trim());
        assert_eq!(
            result.segments.present().len(),
            1,
            "plain paper should produce only a main segment"
        );
        assert_eq!(result.segments.get(Region::Backmatter), None);
    }
}
