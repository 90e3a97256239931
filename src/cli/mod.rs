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

//! Command-line interface for evaluating expressions

pub mod config;
pub mod output;
pub mod repl;

use clap::Parser;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "aapie")]
#[command(about = "Evaluate infix expressions such as 3 + max(2, sqrt(16))")]
#[command(version)]
pub struct Cli {
    /// Expression to evaluate; several arguments are joined with spaces
    #[arg(value_name = "EXPRESSION", allow_hyphen_values = true, trailing_var_arg = true)]
    pub expression: Vec<String>,

    /// Register a library before evaluating (can be used multiple times)
    #[arg(long = "library", short = 'l', value_name = "NAME")]
    pub libraries: Vec<String>,

    /// Start the interactive shell
    #[arg(long, short)]
    pub interactive: bool,

    /// List registered namespaces and their functions
    #[arg(long)]
    pub list: bool,

    /// Print the postfix form instead of evaluating
    #[arg(long)]
    pub postfix: bool,

    /// Output format
    #[arg(long, short = 'o', value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Shorthand for --output-format json
    #[arg(long, conflicts_with = "output_format")]
    pub json: bool,

    /// Configuration file to use instead of the standard locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Suppress informational messages
    #[arg(long, short)]
    pub quiet: bool,

    /// Verbose output with additional details
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Expression text, if any was given
    pub fn expression_text(&self) -> Option<String> {
        if self.expression.is_empty() {
            None
        } else {
            Some(self.expression.join(" "))
        }
    }

    /// Selected output format
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output_format.unwrap_or(OutputFormat::Pretty)
        }
    }
}
