use std::path::PathBuf;

use clap::Parser;
use gosplit_config::GosplitConfig;
use gosplit_core::enums::SplitMode;

pub mod global;

pub use global::{GlobalFlags, MethodStrategyArg, OutputFormat};

/// Top-level CLI parser for the `gosplit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "gosplit",
    version,
    about = "Split Go source files into one file per declaration"
)]
pub struct Cli {
    /// Directory to process recursively
    #[arg(required_unless_present = "show_config")]
    pub directory: Option<PathBuf>,

    /// Split `_test.go` files into one file per test function
    #[arg(long)]
    pub test: bool,

    /// Where public methods go: their own file, or next to their type
    #[arg(long, value_enum)]
    pub method_strategy: Option<MethodStrategyArg>,

    /// Leave public methods in place
    #[arg(long)]
    pub no_methods: bool,

    /// Do not split `<file>_test.go` alongside `<file>.go`
    #[arg(long)]
    pub no_companion_tests: bool,

    /// Plan and report without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Replace output files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Output format: text, json, raw
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (info logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SplitMode {
        if self.test {
            SplitMode::Tests
        } else {
            SplitMode::Public
        }
    }

    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut GosplitConfig) {
        if let Some(strategy) = self.method_strategy {
            config.split.method_strategy = strategy.into();
        }
        if self.no_methods {
            config.split.extract_methods = false;
        }
        if self.no_companion_tests {
            config.split.split_companion_tests = false;
        }
        if self.dry_run {
            config.split.dry_run = true;
        }
        if self.overwrite {
            config.split.overwrite_existing = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use gosplit_config::GosplitConfig;
    use gosplit_core::enums::{MethodStrategy, SplitMode};
    use pretty_assertions::assert_eq;

    use super::{Cli, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn directory_is_required() {
        assert!(Cli::try_parse_from(["gosplit"]).is_err());
        let cli = Cli::try_parse_from(["gosplit", "pkg"]).expect("cli should parse");
        assert_eq!(cli.directory.as_deref(), Some(std::path::Path::new("pkg")));
        assert_eq!(cli.mode(), SplitMode::Public);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn show_config_needs_no_directory() {
        let cli = Cli::try_parse_from(["gosplit", "--show-config"]).expect("cli should parse");
        assert!(cli.show_config);
        assert!(cli.directory.is_none());
    }

    #[test]
    fn test_flag_selects_test_split() {
        let cli = Cli::try_parse_from(["gosplit", "--test", "pkg"]).expect("cli should parse");
        assert_eq!(cli.mode(), SplitMode::Tests);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "gosplit",
            "--method-strategy",
            "with-struct",
            "--no-methods",
            "--no-companion-tests",
            "--dry-run",
            "--overwrite",
            "pkg",
        ])
        .expect("cli should parse");

        let mut config = GosplitConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.split.method_strategy, MethodStrategy::WithStruct);
        assert!(!config.split.extract_methods);
        assert!(!config.split.split_companion_tests);
        assert!(config.split.dry_run);
        assert!(config.split.overwrite_existing);
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cli = Cli::try_parse_from(["gosplit", "pkg"]).expect("cli should parse");
        let mut config = GosplitConfig::default();
        config.split.method_strategy = MethodStrategy::WithStruct;
        cli.apply_overrides(&mut config);
        assert_eq!(config.split.method_strategy, MethodStrategy::WithStruct);
        assert!(config.split.extract_methods);
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for (value, expected) in [
            ("text", OutputFormat::Text),
            ("json", OutputFormat::Json),
            ("raw", OutputFormat::Raw),
        ] {
            let cli = Cli::try_parse_from(["gosplit", "--format", value, "pkg"])
                .expect("cli should parse");
            assert_eq!(cli.format, expected);
        }
        assert!(Cli::try_parse_from(["gosplit", "--format", "xml", "pkg"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["gosplit", "-q", "-v", "pkg"]).is_err());
    }
}
