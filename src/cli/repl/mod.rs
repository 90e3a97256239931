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

//! Interactive shell

mod commands;
mod session;

pub use commands::ReplCommand;
pub use session::ReplSession;

use std::path::PathBuf;

use super::output::OutputFormat;

/// Configuration for a REPL session
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt text
    pub prompt: String,
    /// History file, if history is kept
    pub history_file: Option<PathBuf>,
    /// Maximum number of history entries
    pub history_size: usize,
    /// Output format for results
    pub output_format: OutputFormat,
    /// Enable colored output
    pub color_output: bool,
    /// Skip the welcome banner
    pub quiet: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "aapie".to_string(),
            history_file: None,
            history_size: 1000,
            output_format: OutputFormat::Pretty,
            color_output: true,
            quiet: false,
        }
    }
}
