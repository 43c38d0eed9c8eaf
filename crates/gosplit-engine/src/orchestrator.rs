//! Per-file split orchestration: parse, select, plan, render, write.
//!
//! All outputs of a file, and of its companion test file, are rendered and
//! checked for conflicts before anything is written. Writing itself is not
//! transactional: if a write fails halfway, the files already written stay.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use gosplit_config::GosplitConfig;
use gosplit_core::entities::SourceFile;
use gosplit_core::enums::{FileState, SplitMode};
use gosplit_core::errors::CoreError;
use gosplit_core::responses::{CreatedFile, FileReport, SplitReport};
use gosplit_parser::{companion_test_file, parse_go, render};
use tracing::{debug, info, warn};

use crate::attribution::AttributionPolicy;
use crate::companion::select_companion_tests;
use crate::error::SplitError;
use crate::extract::{Extraction, ExtractionMode, Extractor};
use crate::imports::ImportResolver;
use crate::naming::Namer;
use crate::plan::{FileLayout, PlanContext, Remaining, build_plan, target_names};
use crate::walk::discover_go_files;

/// A step of [`Splitter::split_directory_with`].
#[derive(Debug, Clone, Copy)]
pub enum SplitProgress<'a> {
    /// Number of candidate files found.
    Discovered(usize),
    Started(&'a Path),
    Finished(&'a FileReport),
}

/// Splits Go files according to a [`GosplitConfig`].
#[derive(Debug, Clone)]
pub struct Splitter {
    config: GosplitConfig,
}

/// A file whose outputs are rendered but not yet written.
#[derive(Debug)]
struct PreparedFile {
    path: PathBuf,
    state: FileState,
    outputs: Vec<RenderedOutput>,
    /// New contents of the original, or `None` to delete it.
    remaining: Option<String>,
}

#[derive(Debug)]
struct RenderedOutput {
    created: CreatedFile,
    text: String,
}

impl Splitter {
    #[must_use]
    pub const fn new(config: GosplitConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GosplitConfig {
        &self.config
    }

    /// Files under `root` that `mode` processes.
    ///
    /// # Errors
    /// See [`discover_go_files`].
    pub fn discover(&self, root: &Path, mode: SplitMode) -> Result<Vec<PathBuf>, SplitError> {
        discover_go_files(root, mode, &self.config.walk)
    }

    /// Process every candidate file under `root`, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first [`SplitError`] raised by discovery or by a file.
    pub fn split_directory(&self, root: &Path, mode: SplitMode) -> Result<SplitReport, SplitError> {
        self.split_directory_with(root, mode, |_| {})
    }

    /// [`Splitter::split_directory`], reporting each step to `on_progress`.
    ///
    /// # Errors
    /// Returns the first [`SplitError`] raised by discovery or by a file.
    pub fn split_directory_with<F>(
        &self,
        root: &Path,
        mode: SplitMode,
        mut on_progress: F,
    ) -> Result<SplitReport, SplitError>
    where
        F: FnMut(SplitProgress<'_>),
    {
        let files = self.discover(root, mode)?;
        debug!(root = %root.display(), files = files.len(), %mode, "discovered files");
        on_progress(SplitProgress::Discovered(files.len()));

        let mut report = SplitReport::new(root.to_path_buf(), mode, self.config.split.dry_run);
        for path in &files {
            on_progress(SplitProgress::Started(path));
            let file_report = self.process_file(path, mode)?;
            on_progress(SplitProgress::Finished(&file_report));
            report.files.push(file_report);
        }
        Ok(report)
    }

    /// Split one file.
    ///
    /// # Errors
    /// Parse, render, I/O, and conflict errors carry the offending path.
    pub fn process_file(&self, path: &Path, mode: SplitMode) -> Result<FileReport, SplitError> {
        let file = load(path)?;
        let mut state = FileState::Parsed;

        if file.uses_cgo {
            advance(&mut state, FileState::Skipped)?;
            warn!(path = %path.display(), "skipping cgo file");
            let mut report = FileReport::new(path.to_path_buf(), state);
            report.skipped_reason = Some("imports \"C\"".to_string());
            return Ok(report);
        }

        let extraction = self.extractor().extract(&file, &self.modes(mode));
        if extraction.is_empty() {
            advance(&mut state, FileState::Untouched)?;
            debug!(path = %path.display(), "nothing to extract");
            return Ok(FileReport::new(path.to_path_buf(), state));
        }

        let targets = target_names(&file, &extraction, &self.plan_context());
        let primary = self.prepare(path, &file, &extraction, &targets)?;
        let companion = if mode == SplitMode::Public && self.config.split.split_companion_tests {
            self.prepare_companion(path, &file, &extraction)?
        } else {
            None
        };
        self.check_conflicts(std::iter::once(&primary).chain(companion.as_ref()))?;

        self.write_outputs(&primary)?;
        let companion_report = match companion {
            Some(companion) => {
                self.write_outputs(&companion)?;
                Some(Box::new(self.finish(companion)?))
            }
            None => None,
        };
        let mut report = self.finish(primary)?;
        report.companion = companion_report;
        Ok(report)
    }

    fn modes(&self, mode: SplitMode) -> Vec<ExtractionMode> {
        match mode {
            SplitMode::Tests => vec![ExtractionMode::Tests],
            SplitMode::Public => {
                let mut modes = vec![ExtractionMode::PublicFunctions];
                if self.config.split.extract_methods {
                    modes.push(ExtractionMode::PublicMethods);
                }
                modes.push(ExtractionMode::PublicGroups);
                modes
            }
        }
    }

    const fn policy(&self) -> AttributionPolicy {
        AttributionPolicy::new(self.config.split.max_comment_gap)
    }

    fn extractor(&self) -> Extractor<'_> {
        Extractor::new(self.policy(), &self.config.naming.test_prefix)
    }

    fn plan_context(&self) -> PlanContext<'_> {
        PlanContext {
            namer: Namer::new(&self.config.naming),
            resolver: ImportResolver::new(&self.config.imports),
            strategy: self.config.split.method_strategy,
            common_stem: &self.config.split.common_file_stem,
            collision_prefix: &self.config.split.collision_prefix,
        }
    }

    /// Plan and render the split of `file`, read from `path`.
    fn prepare(
        &self,
        path: &Path,
        file: &SourceFile,
        extraction: &Extraction,
        targets: &[String],
    ) -> Result<PreparedFile, SplitError> {
        let mut state = FileState::Parsed;
        advance(&mut state, FileState::Extracted)?;

        let original_name = file_name_of(path)?;
        let plan = build_plan(file, extraction, targets, original_name, &self.plan_context());
        plan.check_partition(file)?;

        let mut outputs = Vec::with_capacity(plan.units.len());
        for unit in &plan.units {
            let out_path = path.with_file_name(&unit.file_name);
            let text = render(&unit.layout.to_render(file)).map_err(|source| SplitError::Render {
                path: out_path.clone(),
                source,
            })?;
            outputs.push(RenderedOutput {
                created: created_file(file, out_path, &unit.layout),
                text,
            });
        }
        let remaining = match &plan.remaining {
            Remaining::Rewrite(layout) => Some(render(&layout.to_render(file)).map_err(|source| {
                SplitError::Render {
                    path: path.to_path_buf(),
                    source,
                }
            })?),
            Remaining::Delete => None,
        };
        debug!(
            path = %path.display(),
            outputs = outputs.len(),
            keep_original = remaining.is_some(),
            "planned split"
        );

        Ok(PreparedFile {
            path: path.to_path_buf(),
            state,
            outputs,
            remaining,
        })
    }

    /// The `_test.go` file next to `path`, split along the public functions
    /// extracted from `file`.
    fn prepare_companion(
        &self,
        path: &Path,
        file: &SourceFile,
        extraction: &Extraction,
    ) -> Result<Option<PreparedFile>, SplitError> {
        let functions: Vec<&str> = extraction
            .selected
            .iter()
            .filter(|s| s.mode == ExtractionMode::PublicFunctions)
            .filter_map(|s| file.declaration(s.decl).name())
            .collect();
        if functions.is_empty() {
            return Ok(None);
        }
        let Some(test_name) = path
            .file_name()
            .and_then(OsStr::to_str)
            .and_then(companion_test_file)
        else {
            return Ok(None);
        };
        let test_path = path.with_file_name(test_name);
        if !test_path.is_file() {
            return Ok(None);
        }

        let test_file = load(&test_path)?;
        if test_file.uses_cgo {
            warn!(path = %test_path.display(), "skipping cgo companion test file");
            return Ok(None);
        }
        let split = select_companion_tests(
            &test_file,
            &functions,
            &self.config.naming.test_prefix,
            self.policy(),
        );
        if split.extraction.is_empty() {
            debug!(path = %test_path.display(), "no companion tests match");
            return Ok(None);
        }
        let targets = split.targets(&Namer::new(&self.config.naming));
        self.prepare(&test_path, &test_file, &split.extraction, &targets)
            .map(Some)
    }

    fn check_conflicts<'p>(
        &self,
        files: impl Iterator<Item = &'p PreparedFile> + Clone,
    ) -> Result<(), SplitError> {
        let originals: BTreeSet<&Path> = files.clone().map(|f| f.path.as_path()).collect();
        let mut seen = BTreeSet::new();
        for output in files.flat_map(|f| &f.outputs) {
            let path = output.created.path.as_path();
            let taken = !self.config.split.overwrite_existing
                && !originals.contains(path)
                && path.exists();
            if taken || !seen.insert(path) {
                return Err(SplitError::Conflict {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    fn write_outputs(&self, prepared: &PreparedFile) -> Result<(), SplitError> {
        if self.config.split.dry_run {
            return Ok(());
        }
        if let Some(dir) = prepared.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            ensure_dir(dir, self.config.split.dir_mode)?;
        }
        for output in &prepared.outputs {
            write_file(&output.created.path, &output.text, self.config.split.file_mode)?;
            info!(
                path = %output.created.path.display(),
                declarations = output.created.declarations.len(),
                "created"
            );
        }
        Ok(())
    }

    /// Rewrite or delete the original and build its report.
    fn finish(&self, prepared: PreparedFile) -> Result<FileReport, SplitError> {
        let PreparedFile {
            path,
            mut state,
            outputs,
            remaining,
        } = prepared;
        let dry_run = self.config.split.dry_run;
        match remaining {
            Some(text) => {
                advance(&mut state, FileState::Rewritten)?;
                if !dry_run {
                    write_file(&path, &text, self.config.split.file_mode)?;
                    info!(path = %path.display(), "updated");
                }
            }
            None => {
                advance(&mut state, FileState::Deleted)?;
                if !dry_run {
                    fs::remove_file(&path).map_err(|e| SplitError::io(&path, e))?;
                    info!(path = %path.display(), "deleted");
                }
            }
        }
        let mut report = FileReport::new(path, state);
        report.created = outputs.into_iter().map(|o| o.created).collect();
        Ok(report)
    }
}

fn load(path: &Path) -> Result<SourceFile, SplitError> {
    let source = fs::read_to_string(path).map_err(|e| SplitError::io(path, e))?;
    parse_go(&source).map_err(|source| SplitError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn advance(state: &mut FileState, next: FileState) -> Result<(), CoreError> {
    if !state.can_transition_to(next) {
        return Err(CoreError::InvalidTransition {
            from: *state,
            to: next,
        });
    }
    *state = next;
    Ok(())
}

fn file_name_of(path: &Path) -> Result<&str, SplitError> {
    path.file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| SplitError::InvalidPath {
            path: path.to_path_buf(),
        })
}

fn created_file(file: &SourceFile, path: PathBuf, layout: &FileLayout) -> CreatedFile {
    CreatedFile {
        path,
        declarations: layout
            .declarations
            .iter()
            .map(|id| file.declaration(*id).label())
            .collect(),
        imports: layout
            .imports
            .iter()
            .map(|id| file.import(*id).path.clone())
            .collect(),
    }
}

fn write_file(path: &Path, contents: &str, mode: u32) -> Result<(), SplitError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    let mut handle = options.open(path).map_err(|e| SplitError::io(path, e))?;
    handle
        .write_all(contents.as_bytes())
        .map_err(|e| SplitError::io(path, e))
}

fn ensure_dir(dir: &Path, mode: u32) -> Result<(), SplitError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(dir).map_err(|e| SplitError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn state_machine_rejects_skipping_extraction() {
        let mut state = FileState::Parsed;
        let error = advance(&mut state, FileState::Rewritten).unwrap_err();
        assert_eq!(error.to_string(), "Invalid state transition: parsed to rewritten");
        assert_eq!(state, FileState::Parsed);

        advance(&mut state, FileState::Extracted).expect("parsed -> extracted");
        advance(&mut state, FileState::Deleted).expect("extracted -> deleted");
        assert!(advance(&mut state, FileState::Rewritten).is_err());
    }

    #[test]
    fn file_name_of_rejects_bare_root() {
        assert_eq!(file_name_of(Path::new("pkg/a.go")).expect("name"), "a.go");
        assert!(matches!(
            file_name_of(Path::new("/")),
            Err(SplitError::InvalidPath { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn written_files_use_configured_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("out.go");
        write_file(&path, "package p\n", 0o600).expect("write");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).expect("read"), "package p\n");
    }
}
