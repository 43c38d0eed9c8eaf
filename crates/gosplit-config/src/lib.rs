//! # gosplit-config
//!
//! Layered configuration loading for gosplit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GOSPLIT_*` prefix, `__` as separator)
//! 2. Project-level `.gosplit/config.toml`
//! 3. User-level `~/.config/gosplit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GOSPLIT_SPLIT__MAX_COMMENT_GAP` -> `split.max_comment_gap`,
//! `GOSPLIT_SPLIT__METHOD_STRATEGY` -> `split.method_strategy`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use gosplit_config::GosplitConfig;
//!
//! let config = GosplitConfig::load().expect("config");
//! println!("max comment gap: {} bytes", config.split.max_comment_gap);
//! ```

mod error;
mod imports;
mod naming;
mod split;
mod walk;

pub use error::ConfigError;
pub use imports::{AssertionLibrary, ImportConfig};
pub use naming::NamingConfig;
pub use split::SplitConfig;
pub use walk::WalkConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GosplitConfig {
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub imports: ImportConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

impl GosplitConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`GOSPLIT_*` prefix)
    /// 2. `.gosplit/config.toml` (project-local)
    /// 3. `~/.config/gosplit/config.toml` (user-global)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".gosplit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("GOSPLIT_").split("__"))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.split.validate()?;
        self.naming.validate()?;
        self.imports.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gosplit").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosplit_core::enums::MethodStrategy;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = GosplitConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.split.max_comment_gap, 4000);
        assert_eq!(config.split.method_strategy, MethodStrategy::Separate);
        assert_eq!(config.imports.always_required, "testing");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: GosplitConfig = GosplitConfig::figment().extract()?;
            assert_eq!(config, GosplitConfig::default());
            Ok(())
        });
    }
}
