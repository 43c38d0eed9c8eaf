use std::fmt::Write as _;

use gosplit_core::enums::FileState;
use gosplit_core::responses::{FileReport, ReportTotals, SplitReport};
use serde::Serialize;

use crate::cli::OutputFormat;

/// JSON shape of a run: the report plus its totals.
#[derive(Serialize)]
struct ReportOutput<'a> {
    #[serde(flatten)]
    report: &'a SplitReport,
    totals: ReportTotals,
}

/// Render a split report in the requested format.
pub fn render(report: &SplitReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ReportOutput {
            report,
            totals: report.totals(),
        })?),
        OutputFormat::Raw => {
            let lines = report
                .files
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
    }
}

/// Print a split report in the requested format.
pub fn output(report: &SplitReport, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(report, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn render_text(report: &SplitReport) -> String {
    let mut out = String::new();
    for file in report.files.iter().flat_map(FileReport::with_companion) {
        write_file_lines(&mut out, file);
    }

    let totals = report.totals();
    let _ = write!(
        out,
        "{} files processed: {} created, {} updated, {} deleted, {} untouched",
        totals.files_processed,
        totals.files_created,
        totals.files_rewritten,
        totals.files_deleted,
        totals.files_untouched,
    );
    if report.dry_run {
        out.push_str(" (dry run)");
    }
    out
}

fn write_file_lines(out: &mut String, file: &FileReport) {
    for created in &file.created {
        let _ = writeln!(
            out,
            "created {} ({})",
            created.path.display(),
            created.declarations.join(", ")
        );
    }
    match file.state {
        FileState::Rewritten => {
            let _ = writeln!(out, "updated {}", file.path.display());
        }
        FileState::Deleted => {
            let _ = writeln!(out, "deleted {}", file.path.display());
        }
        FileState::Skipped => {
            let reason = file.skipped_reason.as_deref().unwrap_or("skipped");
            let _ = writeln!(out, "skipped {}: {reason}", file.path.display());
        }
        FileState::Parsed | FileState::Extracted | FileState::Untouched => {}
    }
}
