//! Line editor for the chat prompt, on top of `rustyline_async`.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

#[derive(Debug)]
pub enum InputEvent {
    /// A submitted line, already trimmed. May be empty.
    Message(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Put the terminal in line-editing mode behind `prompt`.
    ///
    /// Anything printed through the returned writer lands above the prompt
    /// instead of on top of it.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    /// Wait for the next line. Non-empty lines go into the up-arrow history;
    /// read errors are reported as [`InputEvent::Eof`].
    pub async fn read_line(&mut self) -> InputEvent {
        let line = match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => line,
            Ok(ReadlineEvent::Interrupted) => return InputEvent::Interrupted,
            Ok(ReadlineEvent::Eof) | Err(_) => return InputEvent::Eof,
        };

        let line = line.trim().to_string();
        if !line.is_empty() {
            self.rl.add_history_entry(line.clone());
        }
        InputEvent::Message(line)
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
