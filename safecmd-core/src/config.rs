//! Runner configuration (TOML file plus environment overrides).

use crate::validate::ProgramPolicy;
use anyhow::{Context, Result};
use safecmd_hal::{LinuxHal, DEFAULT_SHELL};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the shell binary.
pub const SHELL_ENV: &str = "SAFECMD_SHELL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Shell used to interpret command strings (`<shell> -c <command>`).
    pub shell: PathBuf,
    pub program_policy: ProgramPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            program_policy: ProgramPolicy::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("invalid safecmd config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Apply `SAFECMD_SHELL` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(shell) = lookup(SHELL_ENV).filter(|s| !s.trim().is_empty()) {
            log::debug!("{} overrides shell: {}", SHELL_ENV, shell);
            self.shell = PathBuf::from(shell);
        }
        self
    }

    /// The production backend for this configuration.
    pub fn hal(&self) -> LinuxHal {
        LinuxHal::with_shell(&self.shell)
    }
}
