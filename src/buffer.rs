//! Read-only text buffer displayed under the overlays

use std::path::{Path, PathBuf};

/// Lines of a file, without line terminators
#[derive(Debug)]
pub struct Buffer {
    lines: Vec<String>,
    /// Buffer name (file name, or "*scratch*")
    name: String,
    filename: Option<PathBuf>,
}

impl Buffer {
    /// Create a buffer from text
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        // Always have at least one line
        if lines.is_empty() {
            lines.push(String::new());
        }

        Self {
            lines,
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Iterate over all lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = Buffer::from_text("*scratch*", "");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.name(), "*scratch*");
    }

    #[test]
    fn test_lines() {
        let buffer = Buffer::from_text("t", "one\ntwo\r\nthree\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line(1), Some("two"));
        assert_eq!(buffer.line(3), None);
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha\nbeta").unwrap();

        let buffer = Buffer::from_file(file.path()).unwrap();
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.filename(), Some(file.path()));
    }
}
