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

//! REPL session management and main loop

use anyhow::{Context, Result};
use colored::*;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

use super::{ReplCommand, ReplConfig};
use crate::Engine;
use crate::cli::output::{EvaluationOutput, OutputFormatter};

/// What the main loop should do after a line has been handled
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Print this text
    Output(String),
    /// Nothing to print
    Nothing,
    /// Leave the shell
    Quit,
}

/// Evaluates lines and commands, independent of the line editor
#[derive(Debug, Clone)]
pub struct LineHandler {
    engine: Engine,
    formatter: OutputFormatter,
}

impl LineHandler {
    pub fn new(engine: Engine, formatter: OutputFormatter) -> Self {
        Self { engine, formatter }
    }

    /// Handle one line of input
    pub fn handle(&self, line: &str) -> Result<LineOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Nothing);
        }

        let Some(command) = ReplCommand::parse(line)? else {
            return self.evaluate(line).map(LineOutcome::Output);
        };

        let registry = self.engine.registry();
        let outcome = match command {
            ReplCommand::Load { library } => {
                if registry.register_library(&library)? {
                    LineOutcome::Output(format!("Library '{library}' loaded"))
                } else {
                    LineOutcome::Output(format!("Library '{library}' is already loaded"))
                }
            }
            ReplCommand::Unload { namespace } => match registry.remove_namespace(&namespace) {
                Some(_) => LineOutcome::Output(format!("Namespace '{namespace}' removed")),
                None => LineOutcome::Output(format!("Namespace '{namespace}' is not registered")),
            },
            ReplCommand::List => LineOutcome::Output(self.formatter.format_namespaces(registry)?),
            ReplCommand::Postfix { expression } => {
                let postfix = self
                    .engine
                    .postfix(&expression)
                    .with_context(|| format!("cannot convert '{expression}'"))?;
                LineOutcome::Output(postfix.to_string())
            }
            ReplCommand::Help => LineOutcome::Output(ReplCommand::help_text().to_string()),
            ReplCommand::Quit => LineOutcome::Quit,
        };
        Ok(outcome)
    }

    fn evaluate(&self, expression: &str) -> Result<String> {
        let result = self.engine.evaluate(expression);
        let output = EvaluationOutput::new(expression, &result);
        Ok(self.formatter.format_evaluation(&output)?)
    }
}

/// Main REPL session that handles user interaction
pub struct ReplSession {
    handler: LineHandler,
    line_editor: Reedline,
    config: ReplConfig,
    interrupt_count: u32,
}

impl ReplSession {
    /// Create a new REPL session over an engine
    pub fn new(engine: Engine, config: ReplConfig) -> Result<Self> {
        let mut line_editor = Reedline::create();

        if let Some(history_path) = &config.history_file {
            match FileBackedHistory::with_file(config.history_size, history_path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(err) => log::warn!("history disabled: {err}"),
            }
        }

        let formatter = OutputFormatter::new(config.output_format, config.color_output);
        Ok(Self {
            handler: LineHandler::new(engine, formatter),
            line_editor,
            config,
            interrupt_count: 0,
        })
    }

    /// Start the main REPL loop
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.config.prompt.clone()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match self.line_editor.read_line(&prompt) {
                Ok(Signal::Success(buffer)) => {
                    self.interrupt_count = 0;
                    match self.handler.handle(&buffer) {
                        Ok(LineOutcome::Output(text)) => println!("{text}"),
                        Ok(LineOutcome::Nothing) => {}
                        Ok(LineOutcome::Quit) => break,
                        Err(err) => println!("{}", self.format_error(&err)),
                    }
                }
                Ok(Signal::CtrlC) => {
                    self.interrupt_count += 1;
                    if self.interrupt_count > 1 {
                        break;
                    }
                    println!("Use 'quit' or press Ctrl+C again to exit");
                }
                Ok(Signal::CtrlD) => break,
                Err(err) => return Err(err).context("failed to read input"),
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        if self.config.quiet {
            return;
        }
        let title = format!("aapie {}", env!("CARGO_PKG_VERSION"));
        if self.config.color_output {
            println!("{}", title.bold());
        } else {
            println!("{title}");
        }
        println!("Type :help for commands, quit to exit");
    }

    fn format_error(&self, err: &anyhow::Error) -> String {
        let text = format!("Error: {err:#}");
        if self.config.color_output {
            text.red().to_string()
        } else {
            text
        }
    }
}
