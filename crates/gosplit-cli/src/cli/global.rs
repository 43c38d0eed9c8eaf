use clap::ValueEnum;
use gosplit_core::enums::MethodStrategy;

/// Report output mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One line per created, updated, or deleted file.
    #[default]
    Text,
    Json,
    /// Compact JSON, one file report per line.
    Raw,
}

/// CLI spelling of [`MethodStrategy`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MethodStrategyArg {
    Separate,
    WithStruct,
}

impl From<MethodStrategyArg> for MethodStrategy {
    fn from(arg: MethodStrategyArg) -> Self {
        match arg {
            MethodStrategyArg::Separate => Self::Separate,
            MethodStrategyArg::WithStruct => Self::WithStruct,
        }
    }
}

/// Flags shared by the output and progress layers.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
}
