//! Terminal rendering of history entries.
//!
//! Assistant text is parsed with the core response formatter at render time
//! and drawn with `console` styles: bold spans in bold, bullet lines with a
//! leading dot. Nothing rendered here is ever stored back into the history.

use console::style;

use parley_core::chat::format::format_response;
use parley_types::chat::{Message, MessageRole};
use parley_types::format::{FormattedBlock, Span};

const INDENT: &str = "  ";
const BULLET: &str = "\u{2022}";

/// Renders [`Message`]s for the terminal.
pub struct ChatRenderer {
    assistant_name: String,
}

impl ChatRenderer {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    /// Render one history entry, label line included.
    pub fn render_message(&self, message: &Message) -> String {
        if message.is_pending() {
            return format!(
                "{INDENT}{} {}",
                style(&self.assistant_name).cyan().bold(),
                style("typing...").dim()
            );
        }

        match message.role {
            MessageRole::User => format!(
                "{INDENT}{} {}",
                style("You").green().bold(),
                message.raw_content
            ),
            MessageRole::Assistant => format!(
                "{INDENT}{}\n{}",
                style(&self.assistant_name).cyan().bold(),
                self.render_blocks(&format_response(&message.raw_content))
            ),
            MessageRole::SystemError => format!(
                "{INDENT}{} {}",
                style("!").red().bold(),
                style(&message.raw_content).red()
            ),
        }
    }

    /// Render formatted blocks, one output line per block.
    pub fn render_blocks(&self, blocks: &[FormattedBlock]) -> String {
        blocks
            .iter()
            .map(|block| match block {
                FormattedBlock::Paragraph(spans) if spans.is_empty() => String::new(),
                FormattedBlock::Paragraph(spans) => format!("{INDENT}{}", render_spans(spans)),
                FormattedBlock::BulletItem(spans) => {
                    format!("{INDENT}  {} {}", style(BULLET).cyan(), render_spans(spans))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print every entry of a history snapshot.
    pub fn print_history(&self, history: &[Message]) {
        println!();
        if history.is_empty() {
            println!("{INDENT}{}", style("No messages yet.").dim());
        }
        for message in history {
            println!("{}", self.render_message(message));
            println!();
        }
    }

    /// Print the newest entry of a history snapshot, if any.
    pub fn print_latest(&self, history: &[Message]) {
        if let Some(message) = history.last() {
            println!();
            println!("{}", self.render_message(message));
            println!();
        }
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.bold {
                style(&span.text).bold().to_string()
            } else {
                span.text.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::Entry;

    fn renderer() -> ChatRenderer {
        console::set_colors_enabled(false);
        ChatRenderer::new("Parley")
    }

    #[test]
    fn test_render_bullets_and_paragraphs() {
        let r = renderer();
        let blocks = format_response("Try these:\n* **Yoga** in the morning\n\nEnjoy!");
        assert_eq!(
            r.render_blocks(&blocks),
            "  Try these:\n    \u{2022} Yoga in the morning\n\n  Enjoy!"
        );
    }

    #[test]
    fn test_render_pending_placeholder() {
        let r = renderer();
        let msg = Message::from_entry(0, Entry::pending_assistant());
        assert_eq!(r.render_message(&msg), "  Parley typing...");
    }

    #[test]
    fn test_render_user_message_is_verbatim() {
        let r = renderer();
        let msg = Message::from_entry(1, Entry::user("keep **stars** as typed"));
        assert_eq!(r.render_message(&msg), "  You keep **stars** as typed");
    }

    #[test]
    fn test_render_system_error() {
        let r = renderer();
        let msg = Message::from_entry(2, Entry::system_error());
        assert_eq!(
            r.render_message(&msg),
            "  ! Error: Failed to fetch response from server"
        );
    }

    #[test]
    fn test_render_assistant_message() {
        let r = renderer();
        let msg = Message::from_entry(3, Entry::assistant("* a\n**b**"));
        assert_eq!(r.render_message(&msg), "  Parley\n    \u{2022} a\n  b");
    }
}
