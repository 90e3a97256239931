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

//! Output formatting for evaluation results

use crate::registry::FunctionRegistry;
use crate::{AapieError, FaultKind, Value};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How results and faults are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored value, faults with a marker under the offending position (default)
    Pretty,
    /// JSON structured output for tooling
    Json,
    /// Bare value text
    Raw,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Raw => write!(f, "raw"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Outcome of evaluating one expression
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutput {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FaultOutput>,
}

/// One function in a namespace listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionListing {
    pub signature: String,
    pub documentation: String,
}

/// Serializable view of an [`AapieError`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultOutput {
    pub kind: FaultKind,
    pub message: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&AapieError> for FaultOutput {
    fn from(err: &AapieError) -> Self {
        let kind = err.kind();
        Self {
            kind,
            message: kind.user_message(),
            detail: err.to_string(),
            position: err.position(),
        }
    }
}

impl EvaluationOutput {
    /// Pair an expression with its evaluation result
    pub fn new(expression: impl Into<String>, result: &crate::Result<Value>) -> Self {
        let (result, error) = match result {
            Ok(value) => (Some(value.clone()), None),
            Err(err) => (None, Some(FaultOutput::from(err))),
        };
        Self {
            expression: expression.into(),
            result,
            error,
        }
    }

    /// Check if evaluation succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Renders [`EvaluationOutput`] in the selected format
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn format_evaluation(&self, output: &EvaluationOutput) -> Result<String, FormatError> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(output)?),
            OutputFormat::Raw => Ok(match (&output.result, &output.error) {
                (_, Some(fault)) => format!("{}: {}", fault.message, fault.detail),
                (Some(value), None) => value.to_text(),
                (None, None) => String::new(),
            }),
            OutputFormat::Pretty => Ok(match (&output.result, &output.error) {
                (_, Some(fault)) => self.pretty_fault(&output.expression, fault),
                (Some(value), None) => self.pretty_value(value),
                (None, None) => String::new(),
            }),
        }
    }

    /// Describe every namespace in search order with its function signatures
    /// and their documentation
    pub fn format_namespaces(&self, registry: &FunctionRegistry) -> Result<String, FormatError> {
        let namespaces: Vec<(String, Vec<FunctionListing>)> = registry
            .namespace_names()
            .into_iter()
            .filter_map(|name| {
                let namespace = registry.namespace(&name)?;
                let functions = namespace
                    .functions()
                    .into_iter()
                    .map(|function| FunctionListing {
                        signature: function.signature().to_string(),
                        documentation: function.documentation().to_string(),
                    })
                    .collect();
                Some((name, functions))
            })
            .collect();

        if self.format == OutputFormat::Json {
            let mut map = serde_json::Map::new();
            for (name, functions) in namespaces {
                map.insert(name, serde_json::to_value(functions)?);
            }
            return Ok(serde_json::to_string_pretty(&map)?);
        }

        let mut lines = Vec::new();
        for (name, functions) in namespaces {
            lines.push(if self.color {
                name.bold().to_string()
            } else {
                name
            });
            for function in functions {
                lines.push(match (function.documentation.is_empty(), self.color) {
                    (true, _) => format!("  {}", function.signature),
                    (false, true) => format!(
                        "  {}  {}",
                        function.signature,
                        function.documentation.dimmed()
                    ),
                    (false, false) => {
                        format!("  {}  {}", function.signature, function.documentation)
                    }
                });
            }
        }
        Ok(lines.join("\n"))
    }

    fn pretty_value(&self, value: &Value) -> String {
        let text = value.to_text();
        if !self.color {
            return text;
        }
        match value {
            Value::Number(_) => text.cyan().to_string(),
            Value::String(_) => text.green().to_string(),
            Value::Boolean(_) => text.yellow().to_string(),
        }
    }

    fn pretty_fault(&self, expression: &str, fault: &FaultOutput) -> String {
        let mut lines = Vec::with_capacity(4);
        if self.color {
            lines.push(fault.message.red().bold().to_string());
            lines.push(format!("  {}", fault.detail.dimmed()));
        } else {
            lines.push(fault.message.to_string());
            lines.push(format!("  {}", fault.detail));
        }

        if let Some(position) = fault.position {
            let column = expression
                .char_indices()
                .take_while(|(offset, _)| *offset < position)
                .count();
            let marker = format!("{}^", " ".repeat(column));
            lines.push(format!("  {expression}"));
            lines.push(if self.color {
                format!("  {}", marker.red())
            } else {
                format!("  {marker}")
            });
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;
    use pretty_assertions::assert_eq;

    fn output(expression: &str) -> EvaluationOutput {
        let engine = Engine::new().unwrap();
        EvaluationOutput::new(expression, &engine.evaluate(expression))
    }

    #[test]
    fn test_raw_output() {
        let formatter = OutputFormatter::new(OutputFormat::Raw, false);
        assert_eq!(formatter.format_evaluation(&output("max(3, 7)")).unwrap(), "7.0");
        assert_eq!(
            formatter.format_evaluation(&output("\"a\" - 1")).unwrap(),
            "Missing argument in expression: Operator '-' cannot combine String and Number"
        );
    }

    #[test]
    fn test_pretty_fault_marks_position() {
        let formatter = OutputFormatter::new(OutputFormat::Pretty, false);
        let text = formatter.format_evaluation(&output("1 + (2")).unwrap();
        assert_eq!(
            text,
            "Missing bracket in expression\n  Missing ')' for bracket opened at position 4\n  1 + (2\n      ^"
        );
    }

    #[test]
    fn test_json_output() {
        let formatter = OutputFormatter::new(OutputFormat::Json, false);
        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_evaluation(&output("1 + 1")).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "expression": "1 + 1", "result": 2.0 }));

        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_evaluation(&output("nope(1)")).unwrap())
                .unwrap();
        assert_eq!(json["error"]["kind"], "FormulaError");
        assert_eq!(json["error"]["message"], "No such library or function");
        assert!(json["error"].get("position").is_none());
    }

    #[test]
    fn test_namespace_listing() {
        let engine = Engine::new().unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Raw, false);
        let text = formatter.format_namespaces(engine.registry()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("math"));
        assert_eq!(lines.next(), Some("  abs(Number) -> Number  Absolute value"));
        assert!(text.contains("  pow(Number, Number) -> Number  First argument raised to the second"));
    }

    #[test]
    fn test_namespace_listing_json() {
        let engine = Engine::new().unwrap();
        let formatter = OutputFormatter::new(OutputFormat::Json, false);
        let json: serde_json::Value =
            serde_json::from_str(&formatter.format_namespaces(engine.registry()).unwrap())
                .unwrap();
        assert_eq!(json["math"][0]["signature"], "abs(Number) -> Number");
        assert_eq!(json["math"][0]["documentation"], "Absolute value");
    }
}
