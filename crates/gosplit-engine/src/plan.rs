//! Partitioning an extraction into output files.
//!
//! A [`SplitPlan`] is a pure function of the parsed file and its
//! [`Extraction`]: which declarations, comments, and imports go into each new
//! file, and what is left for the original. Nothing here touches the
//! filesystem.

use std::collections::{BTreeMap, BTreeSet};

use gosplit_core::entities::SourceFile;
use gosplit_core::enums::MethodStrategy;
use gosplit_core::errors::CoreError;
use gosplit_core::ids::{CommentId, DeclId, ImportId};
use gosplit_parser::{RenderFile, has_build_suffix};

use crate::extract::{ExtractionMode, Extraction};
use crate::imports::ImportResolver;
use crate::naming::Namer;

/// Appended to a derived stem that the go tool would read as a test or
/// platform file name.
const NEUTRAL_SUFFIX: &str = "_decl";

/// Everything a plan needs besides the file itself.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub namer: Namer<'a>,
    pub resolver: ImportResolver<'a>,
    pub strategy: MethodStrategy,
    pub common_stem: &'a str,
    pub collision_prefix: &'a str,
}

/// The pieces of a source file to render, as handles into the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLayout {
    pub header: Vec<CommentId>,
    pub package_doc: Option<CommentId>,
    pub imports: Vec<ImportId>,
    /// Comments from inside import declarations.
    pub import_comments: Vec<CommentId>,
    pub declarations: Vec<DeclId>,
    pub comments: Vec<CommentId>,
}

impl FileLayout {
    #[must_use]
    pub fn to_render<'f>(&self, file: &'f SourceFile) -> RenderFile<'f> {
        RenderFile {
            file,
            header: self.header.clone(),
            package_doc: self.package_doc,
            imports: self.imports.clone(),
            import_comments: self.import_comments.clone(),
            declarations: self.declarations.clone(),
            comments: self.comments.clone(),
        }
    }
}

/// One new file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub file_name: String,
    pub layout: FileLayout,
}

/// What happens to the original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remaining {
    Rewrite(FileLayout),
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub units: Vec<OutputUnit>,
    pub remaining: Remaining,
}

/// Output file name for each selection of `extraction`, before collision
/// handling.
///
/// Under [`MethodStrategy::WithStruct`] a method shares the file of the
/// selected type group that declares its receiver. A method whose receiver
/// type is not extracted keeps its own `<receiver>_<method>` file.
#[must_use]
pub fn target_names(file: &SourceFile, extraction: &Extraction, ctx: &PlanContext<'_>) -> Vec<String> {
    let type_stems = if ctx.strategy == MethodStrategy::WithStruct {
        owning_group_stems(file, extraction, ctx)
    } else {
        BTreeMap::new()
    };

    extraction
        .selected
        .iter()
        .map(|selection| {
            let decl = file.declaration(selection.decl);
            match selection.mode {
                ExtractionMode::Tests => {
                    let stem = ctx.namer.test_stem(decl.name().unwrap_or_default());
                    format!("{}_test.go", neutral_stem(stem, true))
                }
                ExtractionMode::PublicFunctions => {
                    let stem = ctx.namer.function_stem(decl.name().unwrap_or_default());
                    format!("{}.go", neutral_stem(stem, false))
                }
                ExtractionMode::PublicMethods => {
                    let receiver = receiver_type(file, selection.decl).unwrap_or_default();
                    let stem = type_stems.get(receiver).cloned().unwrap_or_else(|| {
                        ctx.namer.method_stem(receiver, decl.name().unwrap_or_default())
                    });
                    format!("{}.go", neutral_stem(stem, false))
                }
                ExtractionMode::PublicGroups => {
                    let stem = decl
                        .as_group()
                        .and_then(|group| {
                            group
                                .members
                                .iter()
                                .find_map(|member| type_stems.get(member.as_str()))
                        })
                        .cloned()
                        .unwrap_or_else(|| ctx.common_stem.to_string());
                    format!("{}.go", neutral_stem(stem, false))
                }
            }
        })
        .collect()
}

/// Stem of the file each extracted method receiver type lands in: the first
/// member of its group that has extracted methods names the group's file.
fn owning_group_stems<'f>(
    file: &'f SourceFile,
    extraction: &Extraction,
    ctx: &PlanContext<'_>,
) -> BTreeMap<&'f str, String> {
    let method_types: BTreeSet<&str> = extraction
        .selected
        .iter()
        .filter(|s| s.mode == ExtractionMode::PublicMethods)
        .filter_map(|s| receiver_type(file, s.decl))
        .collect();

    let mut stems = BTreeMap::new();
    for selection in &extraction.selected {
        if selection.mode != ExtractionMode::PublicGroups {
            continue;
        }
        let Some(group) = file.declaration(selection.decl).as_group() else {
            continue;
        };
        let mut owned = group
            .members
            .iter()
            .map(String::as_str)
            .filter(|member| method_types.contains(member));
        let Some(owner) = owned.next() else {
            continue;
        };
        let stem = ctx.namer.function_stem(owner);
        for member in owned {
            stems.insert(member, stem.clone());
        }
        stems.insert(owner, stem);
    }
    stems
}

/// `stem` unchanged unless `<stem>.go` (or `<stem>_test.go` for a test file)
/// would be excluded from some builds.
fn neutral_stem(stem: String, test_file: bool) -> String {
    if has_build_suffix(&stem) || (!test_file && stem.ends_with("_test")) {
        format!("{stem}{NEUTRAL_SUFFIX}")
    } else {
        stem
    }
}

fn receiver_type(file: &SourceFile, id: DeclId) -> Option<&str> {
    file.declaration(id)
        .as_function()
        .and_then(|f| f.receiver.as_ref())
        .and_then(|r| r.type_name.as_deref())
}

/// Partition `file` according to `extraction`, one target name per
/// selection.
///
/// Selections sharing a target are merged into one unit. A target equal to
/// `original_name` gets the collision prefix.
#[must_use]
pub fn build_plan(
    file: &SourceFile,
    extraction: &Extraction,
    targets: &[String],
    original_name: &str,
    ctx: &PlanContext<'_>,
) -> SplitPlan {
    let constraints: Vec<CommentId> = file
        .header
        .iter()
        .copied()
        .filter(|id| file.comment(*id).is_build_constraint())
        .collect();

    let mut units: Vec<OutputUnit> = Vec::new();
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    for (selection, target) in extraction.selected.iter().zip(targets) {
        let file_name = if target == original_name {
            format!("{}{target}", ctx.collision_prefix)
        } else {
            target.clone()
        };
        let index = *by_name.entry(file_name.clone()).or_insert_with(|| {
            units.push(OutputUnit {
                file_name,
                layout: FileLayout {
                    header: constraints.clone(),
                    ..FileLayout::default()
                },
            });
            units.len() - 1
        });
        let layout = &mut units[index].layout;
        layout.declarations.push(selection.decl);
        layout.comments.extend(selection.comments.standalone.iter().copied());
    }
    for unit in &mut units {
        unit.layout.declarations.sort_unstable();
        unit.layout.comments.sort_unstable();
        unit.layout.imports = ctx.resolver.used_imports(file, &unit.layout.declarations);
    }

    let extracted = extraction.decl_ids();
    let declarations: Vec<DeclId> = file
        .code_declarations()
        .map(|d| d.id)
        .filter(|id| !extracted.contains(id))
        .collect();
    let blanks = ImportResolver::blank_imports(file);
    let import_comments: Vec<CommentId> = file
        .comments
        .iter()
        .filter(|c| {
            file.enclosing_declaration(c.span)
                .is_some_and(|id| file.declaration(id).is_import())
        })
        .map(|c| c.id)
        .collect();

    if declarations.is_empty() {
        if let Some(first) = units.first_mut() {
            first.layout.header.clone_from(&file.header);
            first.layout.package_doc = file.package_doc;
            merge_imports(&mut first.layout.imports, &blanks);
            first.layout.import_comments = import_comments;
        }
        return SplitPlan {
            units,
            remaining: Remaining::Delete,
        };
    }

    let owned = extraction.owned_comments();
    let header = file.header_comments();
    let kept_docs: BTreeSet<CommentId> = declarations
        .iter()
        .filter_map(|id| file.declaration(*id).doc)
        .collect();
    let comments = file
        .comments
        .iter()
        .filter(|c| !owned.contains(&c.id) && !header.contains(&c.id) && !kept_docs.contains(&c.id))
        .filter(|c| file.enclosing_declaration(c.span).is_none())
        .map(|c| c.id)
        .collect();
    let mut imports = ctx.resolver.used_imports(file, &declarations);
    merge_imports(&mut imports, &blanks);

    SplitPlan {
        units,
        remaining: Remaining::Rewrite(FileLayout {
            header: file.header.clone(),
            package_doc: file.package_doc,
            imports,
            import_comments,
            declarations,
            comments,
        }),
    }
}

fn merge_imports(imports: &mut Vec<ImportId>, extra: &[ImportId]) {
    imports.extend_from_slice(extra);
    imports.sort_unstable();
    imports.dedup();
}

impl SplitPlan {
    /// Layouts of every output unit followed by the remaining file, if kept.
    pub fn layouts(&self) -> impl Iterator<Item = &FileLayout> {
        self.units.iter().map(|u| &u.layout).chain(match &self.remaining {
            Remaining::Rewrite(layout) => Some(layout),
            Remaining::Delete => None,
        })
    }

    /// Every code declaration of `file` lands in exactly one layout, and no
    /// comment is rendered twice.
    ///
    /// # Errors
    /// Returns [`CoreError::InvariantViolation`] naming the first offender.
    pub fn check_partition(&self, file: &SourceFile) -> Result<(), CoreError> {
        let mut seen_decls = BTreeSet::new();
        let mut seen_comments = BTreeSet::new();
        for layout in self.layouts() {
            for id in &layout.declarations {
                let decl = file.declaration(*id);
                if decl.is_import() || !seen_decls.insert(*id) {
                    return Err(CoreError::InvariantViolation(format!(
                        "declaration {} placed twice or as an item",
                        decl.label()
                    )));
                }
                if let Some(doc) = decl.doc
                    && !seen_comments.insert(doc)
                {
                    return Err(duplicate_comment(file, doc));
                }
            }
            for id in layout.comments.iter().chain(&layout.import_comments) {
                if !seen_comments.insert(*id) {
                    return Err(duplicate_comment(file, *id));
                }
            }
        }
        if let Some(missing) = file.code_declarations().find(|d| !seen_decls.contains(&d.id)) {
            return Err(CoreError::InvariantViolation(format!(
                "declaration {} was dropped",
                missing.label()
            )));
        }
        Ok(())
    }
}

fn duplicate_comment(file: &SourceFile, id: CommentId) -> CoreError {
    CoreError::InvariantViolation(format!(
        "comment at line {} rendered twice",
        file.comment(id).start_line + 1
    ))
}
