/// The line being typed
///
/// `cursor` is a character index, not a byte offset. The buffer never holds
/// more than `max_len` characters; extra input is dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    max_len: usize,
}

impl InputState {
    pub fn new(max_len: usize) -> Self {
        Self { buffer: String::new(), cursor: 0, max_len }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer.char_indices().nth(char_index).map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        if self.char_len() >= self.max_len {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole line, truncated to the cap, cursor at the end
    pub fn set(&mut self, text: &str) {
        self.buffer = text.chars().take(self.max_len).collect();
        self.move_end();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        buffer
    }
}

/// Previously submitted lines for Up/Down recall
///
/// `cursor` stays in `[0, len]`; `len` is the fresh line past the newest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecallBuffer {
    entries: Vec<String>,
    cursor: usize,
}

impl RecallBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line and park the cursor past it
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len();
    }

    /// Step towards older entries, stopping at the oldest
    pub fn previous_entry(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step towards newer entries; `None` once past the newest
    pub fn next_entry(&mut self) -> Option<&str> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.entries.get(self.cursor).map(String::as_str)
        } else {
            self.cursor = self.entries.len();
            None
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
