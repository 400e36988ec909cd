//! Line/cursor text-editing state backing every input area.
//!
//! One `TextBuffer` instance backs the code buffer, the compare snippet, the
//! chat input, and the image-path prompt. It is deliberately minimal: owned
//! lines, a clamped cursor, and the handful of edit operations the Insert
//! mode dispatcher needs. No rendering logic lives here — the panel renderers
//! read `lines()` and `cursor()` directly.

/// Editable multi-line text with a cursor, plus a revision counter.
///
/// `revision` increments on every mutation so renderers can cache derived
/// artifacts (syntax highlighting) and rebuild only when the text changed.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    /// Cursor position as (row, column) in character counts, not bytes.
    cursor: (usize, usize),
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self { lines: vec![String::new()], cursor: (0, 0), revision: 0 }
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full text joined with `\n` (no trailing newline).
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the text is empty after trimming whitespace.
    ///
    /// This is the emptiness notion every enablement predicate uses.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Monotonic edit counter for cache invalidation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the entire content and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_owned).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let row = self.lines.len() - 1;
        let col = self.lines[row].chars().count();
        self.cursor = (row, col);
        self.revision += 1;
    }

    /// Clears all content and resets the cursor.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor = (0, 0);
        self.revision += 1;
    }

    /// Inserts a character at the cursor and advances it.
    pub fn insert_char(&mut self, c: char) {
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let byte = char_to_byte(line, col);
        line.insert(byte, c);
        self.cursor = (row, col + 1);
        self.revision += 1;
    }

    /// Splits the current line at the cursor, moving the tail to a new line.
    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor;
        let byte = char_to_byte(&self.lines[row], col);
        let tail = self.lines[row].split_off(byte);
        self.lines.insert(row + 1, tail);
        self.cursor = (row + 1, 0);
        self.revision += 1;
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let byte = char_to_byte(line, col - 1);
            line.remove(byte);
            self.cursor = (row, col - 1);
            self.revision += 1;
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let prev_len = self.lines[row - 1].chars().count();
            self.lines[row - 1].push_str(&tail);
            self.cursor = (row - 1, prev_len);
            self.revision += 1;
        }
    }

    /// Moves the cursor one step, clamping at buffer edges.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let (mut row, mut col) = self.cursor;
        if dy < 0 {
            row = row.saturating_sub(dy.unsigned_abs());
        } else {
            row = (row + dy as usize).min(self.lines.len() - 1);
        }
        // Clamp the column to the new line's length before horizontal moves.
        col = col.min(self.lines[row].chars().count());
        if dx < 0 {
            col = col.saturating_sub(dx.unsigned_abs());
        } else {
            col = (col + dx as usize).min(self.lines[row].chars().count());
        }
        self.cursor = (row, col);
    }
}

/// Converts a character column to a byte offset within `line`.
fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(b, _)| b).unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextBuffer {
        let mut buf = TextBuffer::new();
        for c in s.chars() {
            if c == '\n' {
                buf.insert_newline();
            } else {
                buf.insert_char(c);
            }
        }
        buf
    }

    #[test]
    fn typing_builds_lines_and_text() {
        let buf = typed("def f():\n    pass");
        assert_eq!(buf.lines().len(), 2);
        assert_eq!(buf.text(), "def f():\n    pass");
        assert_eq!(buf.cursor(), (1, 8));
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(TextBuffer::new().is_blank());
        assert!(typed("   \n\t ").is_blank());
        assert!(!typed(" x ").is_blank());
    }

    #[test]
    fn backspace_joins_lines_at_column_zero() {
        let mut buf = typed("ab\ncd");
        buf.move_cursor(-2, 0);
        assert_eq!(buf.cursor(), (1, 0));
        buf.backspace();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn backspace_in_line_removes_previous_char() {
        let mut buf = typed("abc");
        buf.backspace();
        assert_eq!(buf.text(), "ab");
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.text(), "");
        // At (0,0) backspace is a no-op.
        buf.backspace();
        assert_eq!(buf.cursor(), (0, 0));
    }

    #[test]
    fn set_text_replaces_content_and_bumps_revision() {
        let mut buf = TextBuffer::new();
        let before = buf.revision();
        buf.set_text("const x=1;");
        assert_eq!(buf.text(), "const x=1;");
        assert!(buf.revision() > before);
        assert_eq!(buf.cursor(), (0, 10));
    }

    #[test]
    fn cursor_clamps_when_moving_to_shorter_line() {
        let mut buf = typed("longer line\nab");
        buf.move_cursor(0, -1); // up to the longer line; col clamped first to 2
        assert_eq!(buf.cursor().0, 0);
        assert!(buf.cursor().1 <= buf.lines()[0].chars().count());
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut buf = typed("héllo");
        buf.backspace();
        assert_eq!(buf.text(), "héll");
        buf.insert_char('ö');
        assert_eq!(buf.text(), "héllö");
    }
}
