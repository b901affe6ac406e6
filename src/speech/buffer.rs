//! Snippet buffer for accumulating pasted lines before conversion

use log::debug;

/// Buffer that accumulates the code snippet line by line
pub struct SpeechBuffer {
    buffer: String,
}

impl SpeechBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Append one line, terminated with a newline
    pub fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Replace the whole buffer
    pub fn replace(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// Get the current buffer contents
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Discard the buffer contents
    pub fn clear(&mut self) {
        debug!("Clearing snippet buffer: {} chars", self.buffer.len());
        self.buffer.clear();
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Get buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of lines held
    pub fn line_count(&self) -> usize {
        self.buffer.lines().count()
    }
}

impl Default for SpeechBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = SpeechBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_push_line() {
        let mut buffer = SpeechBuffer::new();
        buffer.push_line("def f():");
        buffer.push_line("    return 1");

        assert_eq!(buffer.contents(), "def f():\n    return 1\n");
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut buffer = SpeechBuffer::new();
        buffer.push_line("old");
        buffer.replace("new");
        assert_eq!(buffer.contents(), "new");

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
