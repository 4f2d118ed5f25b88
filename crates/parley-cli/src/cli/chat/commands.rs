//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for history,
//! retrying a failed message and exporting the transcript.

use std::path::PathBuf;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Print the conversation so far.
    History,
    /// Resend the message that last failed.
    Retry,
    /// Write the transcript to a JSON file.
    Export(PathBuf),
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command or missing argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/history" => Some(ChatCommand::History),
        "/retry" | "/r" => Some(ChatCommand::Retry),
        "/export" => {
            if arg.is_empty() {
                Some(ChatCommand::Unknown("/export requires a file path".to_string()))
            } else {
                Some(ChatCommand::Export(PathBuf::from(arg)))
            }
        }
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}          Show this help message", style("/help").cyan());
    println!("  {}       Show the conversation so far", style("/history").cyan());
    println!("  {}         Resend your last message after a failure", style("/retry").cyan());
    println!("  {}  Save the transcript as JSON", style("/export PATH").cyan());
    println!("  {}         Clear the screen", style("/clear").cyan());
    println!("  {}          End the chat session", style("/exit").cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse("what about /help?"), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
        assert_eq!(parse("/QUIT"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
        assert_eq!(parse("/r"), Some(ChatCommand::Retry));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
        assert_eq!(parse("  /history  "), Some(ChatCommand::History));
    }

    #[test]
    fn test_export_with_path() {
        assert_eq!(
            parse("/export  chats/today.json "),
            Some(ChatCommand::Export(PathBuf::from("chats/today.json")))
        );
    }

    #[test]
    fn test_export_requires_path() {
        assert_eq!(
            parse("/export"),
            Some(ChatCommand::Unknown("/export requires a file path".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/dance now"),
            Some(ChatCommand::Unknown("/dance".to_string()))
        );
    }
}
