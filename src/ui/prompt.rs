/// Name entry: a one-line text field drawn over the field.
///
/// Opens pre-filled with the current name. Enter submits the trimmed text,
/// Esc cancels. A blank submission is rejected and the field stays open.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptAction {
    Pending,
    Submitted(String),
    Rejected,
    Cancelled,
}

#[derive(Clone, Debug, Default)]
pub struct NameInput {
    open: bool,
    buffer: String,
    max_len: usize,
}

impl NameInput {
    /// `max_len`: how many letters the field can hold.
    pub fn new(max_len: usize) -> Self {
        NameInput { open: false, buffer: String::new(), max_len }
    }

    pub fn open(&mut self, current: &str) {
        self.open = true;
        self.buffer = current.chars().take(self.max_len).collect();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.buffer.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PromptAction {
        if !self.open || key.kind == KeyEventKind::Release {
            return PromptAction::Pending;
        }
        match key.code {
            KeyCode::Enter => {
                let name = self.buffer.trim().to_string();
                if name.is_empty() {
                    return PromptAction::Rejected;
                }
                self.close();
                PromptAction::Submitted(name)
            }
            KeyCode::Esc => {
                self.close();
                PromptAction::Cancelled
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptAction::Pending
            }
            KeyCode::Char(c)
                if !c.is_control()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if self.buffer.chars().count() < self.max_len {
                    self.buffer.push(c);
                }
                PromptAction::Pending
            }
            _ => PromptAction::Pending,
        }
    }
}
