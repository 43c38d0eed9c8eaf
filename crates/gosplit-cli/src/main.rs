use anyhow::Context;
use clap::Parser;
use gosplit_config::GosplitConfig;
use gosplit_engine::Splitter;

mod cli;
mod commands;
mod output;
mod progress;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("gosplit error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let mut config = GosplitConfig::load().context("failed to load gosplit configuration")?;
    cli.apply_overrides(&mut config);
    config
        .validate()
        .context("invalid gosplit configuration")?;

    if cli.show_config {
        print!(
            "{}",
            toml::to_string_pretty(&config).context("failed to serialize configuration")?
        );
        return Ok(());
    }

    let root = cli
        .directory
        .as_deref()
        .context("a directory to split is required")?;
    let splitter = Splitter::new(config);
    commands::split::handle(&splitter, root, cli.mode(), &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GOSPLIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
