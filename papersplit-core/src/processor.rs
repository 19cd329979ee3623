use crate::assembler::SegmentAssembler;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::rules::{BoundaryLocator, PatternSet, TitleExtractor};
use crate::storage::{calculate_content_hash, DryRunStorage, FileStorage, SegmentStorage};
use crate::types::*;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// Step labels in pipeline order, as shown by `--profile`
const STEP_READ: &str = "1. Read Input";
const STEP_TITLE: &str = "2. Title Extraction";
const STEP_BOUNDARIES: &str = "3. Boundary Detection";
const STEP_ASSEMBLY: &str = "4. Segment Assembly";
const STEP_WRITE: &str = "5. Write Outputs";

/// Collects per-step timings for one split run
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        self.timings.push((step_name.to_string(), elapsed));
        println!("⏱️  {}: {}µs", step_name, elapsed.as_micros());

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        println!("\n📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            println!(
                "   {:.<35} {}µs ({:.1}%)",
                step,
                duration.as_micros(),
                percentage
            );
        }
        println!("   {:.<35} {}µs", "Total", total.as_micros());
    }
}

/// Where each region of one input ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub main: PathBuf,
    pub backmatter: PathBuf,
    pub appendix: PathBuf,
}

impl OutputPaths {
    pub fn for_region(&self, region: Region) -> &Path {
        match region {
            Region::Main => &self.main,
            Region::Backmatter => &self.backmatter,
            Region::Appendix => &self.appendix,
        }
    }
}

pub struct PaperSplitter {
    config: SplitConfig,
    patterns: PatternSet,
    titles: TitleExtractor,
    assembler: SegmentAssembler,
    storage: Box<dyn SegmentStorage>,
}

impl PaperSplitter {
    /// Create PaperSplitter with full dependency injection
    pub fn new_with_dependencies(
        config: SplitConfig,
        storage: Box<dyn SegmentStorage>,
    ) -> Result<Self> {
        config.validate()?;
        let patterns = PatternSet::from_config(&config)?;
        let titles = TitleExtractor::new(&config.title)?;

        Ok(Self {
            patterns,
            titles,
            assembler: SegmentAssembler::new()?,
            storage,
            config,
        })
    }

    /// Convenience constructor for CLI usage: writes files to disk
    pub fn new_cli(config: SplitConfig) -> Result<Self> {
        Self::new_with_dependencies(config, Box::new(FileStorage::new()))
    }

    /// Convenience constructor that plans outputs without writing them
    pub fn new_dry_run(config: SplitConfig) -> Result<Self> {
        Self::new_with_dependencies(config, Box::new(DryRunStorage::new()))
    }

    pub fn storage_name(&self) -> &str {
        self.storage.name()
    }

    /// Run the pure pipeline (title, boundaries, segments) on in-memory text
    pub fn split_text(&self, document: &str) -> SplitDocument {
        let title = self.titles.extract(document);
        let boundaries = BoundaryLocator::new(&self.patterns).locate(document);
        let segments = self.assembler.assemble(document, &boundaries, &title);

        SplitDocument {
            title,
            boundaries,
            segments,
        }
    }

    /// Split `input` and write the region files.
    ///
    /// `output_dir` defaults to the directory holding the input.
    pub fn split_file(&self, input: &Path, output_dir: Option<&Path>) -> Result<SplitOutcome> {
        self.split_file_with_profiler(input, output_dir, &mut StepProfiler::new(false))
    }

    pub fn split_file_with_profiling(
        &self,
        input: &Path,
        output_dir: Option<&Path>,
        enable_profiling: bool,
    ) -> Result<SplitOutcome> {
        let mut profiler = StepProfiler::new(enable_profiling);
        let outcome = self.split_file_with_profiler(input, output_dir, &mut profiler)?;
        profiler.print_summary();
        Ok(outcome)
    }

    fn split_file_with_profiler(
        &self,
        input: &Path,
        output_dir: Option<&Path>,
        profiler: &mut StepProfiler,
    ) -> Result<SplitOutcome> {
        if !input.is_file() {
            return Err(SplitError::InputNotFound(input.to_path_buf()).into());
        }

        log::info!("Splitting {} ({} storage)", input.display(), self.storage.name());

        let document = profiler.time_step(STEP_READ, || read_document(input))?;

        let title = profiler.time_step(STEP_TITLE, || self.titles.extract(&document));

        let boundaries = profiler.time_step(STEP_BOUNDARIES, || {
            BoundaryLocator::new(&self.patterns).locate(&document)
        });

        let segments = profiler.time_step(STEP_ASSEMBLY, || {
            self.assembler.assemble(&document, &boundaries, &title)
        });

        let paths = self.output_paths(input, output_dir);
        let written = profiler.time_step(STEP_WRITE, || {
            self.write_segments(input, &paths, &segments)
        })?;

        let missing = [Region::Backmatter, Region::Appendix]
            .into_iter()
            .filter(|region| segments.get(*region).is_none())
            .collect();

        Ok(SplitOutcome {
            input: input.to_path_buf(),
            input_sha256: calculate_content_hash(&document),
            title,
            boundaries,
            written,
            missing,
        })
    }

    /// Output file locations for `input`: `<stem>.md`, `<stem>_backmatter.md`,
    /// `<stem>_appendix.md` with the configured suffixes and extension
    pub fn output_paths(&self, input: &Path, output_dir: Option<&Path>) -> OutputPaths {
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        };

        let stem = match input.file_stem() {
            Some(stem) => stem.to_string_lossy(),
            None => {
                log::warn!("{} has no file name, writing output.*", input.display());
                "output".into()
            }
        };
        let output = &self.config.output;
        let file = |suffix: &str| dir.join(format!("{stem}{suffix}.{}", output.extension));

        OutputPaths {
            main: file(""),
            backmatter: file(&output.backmatter_suffix),
            appendix: file(&output.appendix_suffix),
            dir,
        }
    }

    fn write_segments(
        &self,
        input: &Path,
        paths: &OutputPaths,
        segments: &SplitSegments,
    ) -> Result<Vec<WrittenSegment>> {
        self.storage.prepare_output_dir(&paths.dir)?;

        if same_file(input, &paths.main) {
            log::warn!(
                "Main output {} replaces the input file",
                paths.main.display()
            );
        }

        let mut written = Vec::new();
        for (region, text) in segments.present() {
            let path = paths.for_region(region);
            self.storage.write_segment(path, text)?;
            log::debug!("Wrote {} segment ({} bytes) to {}", region.label(), text.len(), path.display());
            written.push(WrittenSegment {
                region,
                path: path.to_path_buf(),
                bytes: text.len(),
            });
        }

        Ok(written)
    }
}

fn read_document(input: &Path) -> Result<String> {
    let document = std::fs::read_to_string(input).map_err(|source| SplitError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    Ok(document)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PAPER: &str = "# A Paper\n\nBody.\n\n## Acknowledgments\nThanks.\n\n## Appendix\nProofs.\n";

    #[test]
    fn test_output_paths_default_to_input_dir() {
        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();

        let paths = splitter.output_paths(Path::new("papers/attention.md"), None);
        assert_eq!(paths.dir, PathBuf::from("papers"));
        assert_eq!(paths.main, PathBuf::from("papers/attention.md"));
        assert_eq!(paths.backmatter, PathBuf::from("papers/attention_backmatter.md"));
        assert_eq!(paths.appendix, PathBuf::from("papers/attention_appendix.md"));

        let paths = splitter.output_paths(Path::new("attention.md"), None);
        assert_eq!(paths.dir, PathBuf::from("."));
    }

    #[test]
    fn test_output_paths_respect_output_dir() {
        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let paths = splitter.output_paths(Path::new("in/paper.md"), Some(Path::new("out")));
        assert_eq!(paths.main, PathBuf::from("out/paper.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_paths_keep_non_utf8_stem_recognizable() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let input = Path::new("papers").join(OsStr::from_bytes(b"caf\xe9.md"));
        let paths = splitter.output_paths(&input, None);

        assert_eq!(paths.main, PathBuf::from("papers/caf\u{FFFD}.md"));
        assert_eq!(
            paths.appendix,
            PathBuf::from("papers/caf\u{FFFD}_appendix.md")
        );
    }

    #[test]
    fn test_profiler_uses_pipeline_step_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("paper.md");
        fs::write(&input, PAPER).unwrap();

        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let mut profiler = StepProfiler::new(true);
        splitter
            .split_file_with_profiler(&input, None, &mut profiler)
            .unwrap();

        let steps: Vec<&str> = profiler.timings().iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(
            steps,
            vec![STEP_READ, STEP_TITLE, STEP_BOUNDARIES, STEP_ASSEMBLY, STEP_WRITE]
        );
    }

    #[test]
    fn test_split_text_runs_whole_pipeline() {
        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let split = splitter.split_text(PAPER);

        assert_eq!(split.title, "A Paper");
        assert_eq!(split.boundaries.backmatter_start, PAPER.find("## Acknowledgments"));
        assert_eq!(split.boundaries.appendix_start, PAPER.find("## Appendix"));
        assert_eq!(split.segments.main, "# A Paper\n\nBody.");
    }

    #[test]
    fn test_split_file_writes_all_regions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("paper.md");
        fs::write(&input, PAPER).unwrap();
        let out_dir = temp_dir.path().join("out");

        let splitter = PaperSplitter::new_cli(SplitConfig::default()).unwrap();
        let outcome = splitter.split_file(&input, Some(&out_dir)).unwrap();

        assert_eq!(outcome.written.len(), 3);
        assert!(outcome.missing.is_empty());
        assert_eq!(
            fs::read_to_string(out_dir.join("paper_appendix.md")).unwrap(),
            "# A Paper - Appendix\n\n---\n\n## Appendix\nProofs."
        );
        assert_eq!(fs::read_to_string(&input).unwrap(), PAPER);
    }

    #[test]
    fn test_split_file_reports_missing_regions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("plain.md");
        fs::write(&input, "# Plain\n\nNothing else.\n").unwrap();

        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let outcome = splitter.split_file(&input, None).unwrap();

        assert_eq!(outcome.missing, vec![Region::Backmatter, Region::Appendix]);
        assert!(outcome.written_for(Region::Main).is_some());
        assert!(outcome.written_for(Region::Appendix).is_none());
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let splitter = PaperSplitter::new_dry_run(SplitConfig::default()).unwrap();
        let err = splitter
            .split_file(Path::new("/nonexistent/paper.md"), None)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SplitConfig::default();
        config.output.extension = String::new();
        assert!(PaperSplitter::new_dry_run(config).is_err());
    }

    #[test]
    fn test_profiler_records_steps_only_when_enabled() {
        let mut profiler = StepProfiler::new(true);
        let value = profiler.time_step("step", || 7);
        assert_eq!(value, 7);
        assert_eq!(profiler.timings().len(), 1);

        let mut disabled = StepProfiler::new(false);
        disabled.time_step("step", || ());
        assert!(disabled.timings().is_empty());
    }
}
