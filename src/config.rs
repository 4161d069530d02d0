//! Engine configuration.
//!
//! Every field has a default, so an empty configuration is valid.
//! [`EngineConfig::load`] layers, lowest priority first: defaults, an
//! optional file (format picked from its extension) and environment
//! variables such as `DESIGN_TOKENS_QUANTIZE__COLORS=8` or
//! `DESIGN_TOKENS_NORMALIZE__REM_BASE=10`.

use std::path::Path;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{parse_hex, QuantizeOptions, Result, TokenError};

/// Prefix of the environment variables read by [`EngineConfig::load`].
pub const ENV_PREFIX: &str = "DESIGN_TOKENS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub quantize: QuantizeOptions,
    pub normalize: NormalizeOptions,
}

/// Parameters of [`crate::Normalizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Pixels per rem.
    pub rem_base: f64,
    /// Seed of the primary scale when no chromatic color is extracted.
    pub default_primary: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { rem_base: 16., default_primary: crate::tokens::DEFAULT_PRIMARY.into() }
    }
}

impl NormalizeOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.rem_base.is_finite() && self.rem_base > 0.) {
            return Err(TokenError::invalid_parameter("rem_base", self.rem_base))
        }
        if parse_hex(&self.default_primary).is_none() {
            return Err(TokenError::InvalidColor {
                value: self.default_primary.clone() })
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Load the configuration from `path` (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<EngineConfig> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "reading configuration");
            builder = builder.add_source(File::from(path));
        }
        let cfg: EngineConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("_").separator("__")
                        .try_parsing(true))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.quantize.validate()?;
        self.normalize.validate()
    }
}
