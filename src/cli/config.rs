// Copyright 2024 Aapie Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI configuration file support

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Cli;
use super::output::OutputFormat;

/// CLI configuration loaded from ~/.aapierc or .aapierc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Libraries registered in addition to `math`
    #[serde(default)]
    pub libraries: Vec<String>,

    /// Default output format
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    /// REPL prompt
    #[serde(default)]
    pub prompt: Option<String>,

    /// Disable colored output by default
    #[serde(default)]
    pub no_color: bool,

    /// Enable quiet mode by default
    #[serde(default)]
    pub quiet: bool,

    /// Enable verbose mode by default
    #[serde(default)]
    pub verbose: bool,

    /// Expression history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// History configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Enable expression history
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of history entries
    #[serde(default = "default_history_size")]
    pub max_size: usize,

    /// History file path (relative to home directory if not absolute)
    #[serde(default = "default_history_file")]
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: default_history_size(),
            file: default_history_file(),
        }
    }
}

impl HistoryConfig {
    /// Resolved history file location, `None` when history is disabled
    pub fn path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let file = PathBuf::from(&self.file);
        if file.is_absolute() {
            Some(file)
        } else {
            dirs::home_dir().map(|home| home.join(file))
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

fn default_history_file() -> String {
    ".aapie_history".to_string()
}

impl CliConfig {
    /// Load configuration from standard locations
    ///
    /// Search order:
    /// 1. ./.aapierc (current directory)
    /// 2. ~/.aapierc (home directory)
    /// 3. ~/.config/aapie/config.toml
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(config) = Self::load_from_file(".aapierc") {
            return Ok(config);
        }

        if let Some(home) = dirs::home_dir() {
            for candidate in [
                home.join(".aapierc"),
                home.join(".config").join("aapie").join("config.toml"),
            ] {
                if candidate.exists() {
                    log::debug!("loading configuration from {}", candidate.display());
                    return Self::load_from_file(&candidate);
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a sample configuration file with helpful comments
    pub fn sample_config() -> String {
        r#"# aapie configuration
# This file can be placed at:
#   - ./.aapierc (current directory)
#   - ~/.aapierc (home directory)
#   - ~/.config/aapie/config.toml

# Libraries to register besides math (math, text)
libraries = ["text"]

# Default output format (pretty, json, raw)
output_format = "pretty"

# Prompt shown by the interactive shell
prompt = "aapie"

# Disable colored output
no_color = false

# Suppress informational messages
quiet = false

# Log registry activity
verbose = false

# Expression history configuration
[history]
enabled = true
max_size = 1000
file = ".aapie_history"
"#
        .to_string()
    }

    /// Merge with CLI arguments (CLI args take precedence)
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        let mut merged = cli.clone();

        if merged.output_format.is_none() {
            merged.output_format = self.output_format;
        }
        merged.no_color |= self.no_color;
        merged.quiet |= self.quiet;
        merged.verbose |= self.verbose;

        // Config libraries first, so command line additions are searched after them
        let mut libraries = self.libraries.clone();
        for library in &cli.libraries {
            if !libraries.contains(library) {
                libraries.push(library.clone());
            }
        }
        merged.libraries = libraries;

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_config_parses() {
        let config = CliConfig::from_toml(&CliConfig::sample_config()).unwrap();
        assert_eq!(config.libraries, vec!["text".to_string()]);
        assert_eq!(config.output_format, Some(OutputFormat::Pretty));
        assert_eq!(config.prompt.as_deref(), Some("aapie"));
        assert_eq!(config.history, HistoryConfig::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CliConfig::from_toml("quiet = true").unwrap();
        assert!(config.quiet);
        assert!(config.libraries.is_empty());
        assert!(config.history.enabled);
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_disabled_history_has_no_path() {
        let history = HistoryConfig {
            enabled: false,
            ..HistoryConfig::default()
        };
        assert_eq!(history.path(), None);
    }

    #[test]
    fn test_cli_takes_precedence() {
        let config = CliConfig {
            libraries: vec!["text".to_string()],
            output_format: Some(OutputFormat::Raw),
            no_color: true,
            ..CliConfig::default()
        };
        let cli = Cli::parse_from(["aapie", "-o", "json", "-l", "math", "-l", "text", "1+1"]);
        let merged = config.merge_with_cli(&cli);

        assert_eq!(merged.output_format, Some(OutputFormat::Json));
        assert!(merged.no_color);
        assert_eq!(merged.libraries, vec!["text".to_string(), "math".to_string()]);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("aapie-config-{}.toml", std::process::id()));
        let config = CliConfig {
            libraries: vec!["text".to_string()],
            quiet: true,
            ..CliConfig::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = CliConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
