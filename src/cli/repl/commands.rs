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

//! REPL command parsing and definitions

use anyhow::{Result, anyhow};

/// Available REPL commands
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Register a built-in library
    Load { library: String },
    /// Remove a namespace
    Unload { namespace: String },
    /// List namespaces and their functions
    List,
    /// Show the postfix form of an expression
    Postfix { expression: String },
    /// Show help
    Help,
    /// Exit REPL
    Quit,
}

impl ReplCommand {
    /// Parse a line as a command, or `None` if it is an expression
    ///
    /// Commands start with `:`. The bare word `quit` is accepted as well.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        if line == "quit" {
            return Ok(Some(ReplCommand::Quit));
        }
        let Some(line) = line.strip_prefix(':') else {
            return Ok(None);
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return Err(anyhow!("Empty command"));
        }

        let command = match parts[0] {
            "load" | "l" => {
                if parts.len() != 2 {
                    return Err(anyhow!("Usage: :load <library>"));
                }
                ReplCommand::Load {
                    library: parts[1].to_string(),
                }
            }
            "unload" => {
                if parts.len() != 2 {
                    return Err(anyhow!("Usage: :unload <namespace>"));
                }
                ReplCommand::Unload {
                    namespace: parts[1].to_string(),
                }
            }
            "list" | "ls" => ReplCommand::List,
            "postfix" | "p" => {
                if parts.len() < 2 {
                    return Err(anyhow!("Usage: :postfix <expression>"));
                }
                ReplCommand::Postfix {
                    expression: parts[1..].join(" "),
                }
            }
            "help" | "h" => ReplCommand::Help,
            "quit" | "q" | "exit" => ReplCommand::Quit,
            other => return Err(anyhow!("Unknown command ':{other}'. Type :help for help")),
        };

        Ok(Some(command))
    }

    /// Help text listing every command
    pub fn help_text() -> &'static str {
        "Enter an expression to evaluate it, for example: 3 + max(2, sqrt(16))

Commands:
  :load <library>       register a built-in library (math, text)
  :unload <namespace>   remove a namespace
  :list                 list namespaces and their functions
  :postfix <expression> show the postfix form of an expression
  :help                 show this help
  :quit, quit           leave the shell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expressions_are_not_commands() {
        assert_eq!(ReplCommand::parse("1 + 2").unwrap(), None);
        assert_eq!(ReplCommand::parse("quitter(1)").unwrap(), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("quit").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse(":q").unwrap(), Some(ReplCommand::Quit));
        assert_eq!(
            ReplCommand::parse(":load text").unwrap(),
            Some(ReplCommand::Load {
                library: "text".to_string()
            })
        );
        assert_eq!(
            ReplCommand::parse(":postfix 1 + 2").unwrap(),
            Some(ReplCommand::Postfix {
                expression: "1 + 2".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_commands() {
        assert!(ReplCommand::parse(":").is_err());
        assert!(ReplCommand::parse(":load").is_err());
        assert!(ReplCommand::parse(":frobnicate").is_err());
    }
}
