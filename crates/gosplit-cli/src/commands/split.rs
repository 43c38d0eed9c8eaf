use std::path::Path;

use anyhow::Context;
use gosplit_core::enums::SplitMode;
use gosplit_engine::{SplitProgress, Splitter};

use crate::cli::GlobalFlags;
use crate::output;
use crate::progress::Progress;

/// Split every candidate file under `root` and print the report.
pub fn handle(
    splitter: &Splitter,
    root: &Path,
    mode: SplitMode,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        root.is_dir(),
        "invalid directory '{}': not a directory",
        root.display()
    );

    let progress = Progress::bar(0, "splitting");
    let result = splitter.split_directory_with(root, mode, |step| match step {
        SplitProgress::Discovered(total) => {
            progress.set_length(u64::try_from(total).unwrap_or(u64::MAX));
        }
        SplitProgress::Started(path) => progress.set_message(&path.display().to_string()),
        SplitProgress::Finished(_) => progress.inc(1),
    });

    let report = match result {
        Ok(report) => {
            progress.finish_clear();
            report
        }
        Err(error) => {
            progress.finish_err("failed");
            return Err(error).with_context(|| format!("failed to split {}", root.display()));
        }
    };

    output::output(&report, flags.format)
}
