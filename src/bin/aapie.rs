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

//! Command-line expression evaluator
//!
//! Evaluates the expression given as arguments, or starts an interactive
//! shell with `-i`.

use aapie::Engine;
use aapie::cli::Cli;
use aapie::cli::config::CliConfig;
use aapie::cli::output::{EvaluationOutput, OutputFormat, OutputFormatter};
use aapie::cli::repl::{ReplConfig, ReplSession};
use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use std::process;

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CliConfig::load_from_file(path),
        None => CliConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err:#}");
            process::exit(2);
        }
    };
    let cli = config.merge_with_cli(&cli);

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli, &config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
    builder.parse_default_env();
    builder.init();
}

/// Returns whether every requested evaluation succeeded
fn run(cli: &Cli, config: &CliConfig) -> anyhow::Result<bool> {
    let engine = Engine::new()?;
    for library in &cli.libraries {
        engine
            .registry()
            .register_library(library)
            .with_context(|| format!("cannot load library '{library}'"))?;
    }

    let formatter = OutputFormatter::new(cli.format(), !cli.no_color);

    if cli.list {
        println!("{}", formatter.format_namespaces(engine.registry())?);
    }

    let mut success = true;
    if let Some(expression) = cli.expression_text() {
        success = evaluate(&engine, &formatter, cli, &expression)?;
    }

    if cli.interactive {
        let repl_config = ReplConfig {
            prompt: config.prompt.clone().unwrap_or_else(|| "aapie".to_string()),
            history_file: config.history.path(),
            history_size: config.history.max_size,
            output_format: cli.format(),
            color_output: !cli.no_color,
            quiet: cli.quiet,
        };
        ReplSession::new(engine, repl_config)?.run()?;
    } else if !cli.list && cli.expression.is_empty() {
        Cli::command().print_help()?;
    }

    Ok(success)
}

fn evaluate(
    engine: &Engine,
    formatter: &OutputFormatter,
    cli: &Cli,
    expression: &str,
) -> anyhow::Result<bool> {
    if cli.postfix {
        return match engine.postfix(expression) {
            Ok(postfix) => {
                println!("{postfix}");
                Ok(true)
            }
            Err(err) => {
                let output = EvaluationOutput::new(expression, &Err(err));
                eprintln!("{}", formatter.format_evaluation(&output)?);
                Ok(false)
            }
        };
    }

    let output = EvaluationOutput::new(expression, &engine.evaluate(expression));
    let text = formatter.format_evaluation(&output)?;
    if output.is_success() || formatter.format() == OutputFormat::Json {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
    Ok(output.is_success())
}
