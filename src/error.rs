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

//! Error types for the whole pipeline
//!
//! Each layer reports its own error type. [`AapieError`] wraps them so callers
//! running the full pipeline handle a single type, and [`FaultKind`] groups
//! the detailed errors into the categories shown to users.

use crate::evaluator::EvaluationError;
use crate::parser::ParseError;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AapieError>;

/// Any error raised while parsing, evaluating or configuring functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AapieError {
    /// Scanning or conversion failed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Namespace registration failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// User-facing fault categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// A string literal without a closing quote
    UnterminatedString,
    /// Digits and dots that do not form a number
    InvalidNumber,
    /// A `)` or `,` without a matching `(`, or a call without its bracket
    MissingLBracket,
    /// A `(` that is never closed
    MissingRBracket,
    /// Too few or ill-typed operands
    MissingArg,
    /// A function that cannot be found or fails when called
    FormulaError,
    /// A library that cannot be added
    Library,
}

impl FaultKind {
    /// Short message for the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            FaultKind::UnterminatedString => "Unterminated string in expression",
            FaultKind::InvalidNumber => "Invalid number in expression",
            FaultKind::MissingLBracket | FaultKind::MissingRBracket => {
                "Missing bracket in expression"
            }
            FaultKind::MissingArg => "Missing argument in expression",
            FaultKind::FormulaError | FaultKind::Library => "No such library or function",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl AapieError {
    /// Category of this error
    pub fn kind(&self) -> FaultKind {
        match self {
            AapieError::Parse(err) => match err {
                ParseError::UnterminatedString { .. } => FaultKind::UnterminatedString,
                ParseError::InvalidNumber { .. } => FaultKind::InvalidNumber,
                ParseError::MissingLBracket { .. } | ParseError::MissingCallBracket { .. } => {
                    FaultKind::MissingLBracket
                }
                ParseError::MissingRBracket { .. } => FaultKind::MissingRBracket,
                ParseError::EmptyCall { .. } => FaultKind::MissingArg,
            },
            AapieError::Evaluation(err) => match err {
                EvaluationError::MissingArg { .. }
                | EvaluationError::InvalidOperands { .. }
                | EvaluationError::UnexpectedToken { .. } => FaultKind::MissingArg,
                EvaluationError::MissingRBracket => FaultKind::MissingRBracket,
                EvaluationError::MissingArity { .. } => FaultKind::MissingLBracket,
                EvaluationError::Function(_) => FaultKind::FormulaError,
            },
            AapieError::Registry(_) => FaultKind::Library,
        }
    }

    /// Input offset the error refers to, if it came from the parser
    pub fn position(&self) -> Option<usize> {
        match self {
            AapieError::Parse(err) => Some(err.position()),
            _ => None,
        }
    }
}
