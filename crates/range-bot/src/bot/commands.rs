//! Command parsing for the interactive shell
//!
//! Lines starting with `/` control the shell; everything else is an
//! utterance for the bot.

use crate::error::{BotError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// End the conversation; the next utterance starts a new one
    Reset,
    /// Show help
    Help,
    /// Exit the shell
    Exit,
    /// Natural language utterance (not a command)
    Say { text: String },
}

impl Command {
    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(BotError::Command("Empty input".to_string()));
        }

        let Some(command) = input.strip_prefix('/') else {
            return Ok(Command::Say {
                text: input.to_string(),
            });
        };

        let cmd = command
            .split_whitespace()
            .next()
            .ok_or_else(|| BotError::Command("Empty command".to_string()))?
            .to_lowercase();

        match cmd.as_str() {
            "reset" | "restart" | "r" => Ok(Command::Reset),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(BotError::Command(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"Commands:
  /reset  Start a new conversation
  /help   Show this help
  /exit   Exit

Anything else is sent to the bot, for example:
  give me a random number
  set the range between 10 and 50
  what is the upper limit?"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/reset").unwrap(), Command::Reset);
        assert_eq!(Command::parse("  /EXIT ").unwrap(), Command::Exit);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_utterance() {
        assert_eq!(
            Command::parse(" roll a number ").unwrap(),
            Command::Say {
                text: "roll a number".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("   ").is_err());
        assert!(Command::parse("/").is_err());
        assert!(matches!(
            Command::parse("/dance"),
            Err(BotError::Command(msg)) if msg.contains("dance")
        ));
    }
}
