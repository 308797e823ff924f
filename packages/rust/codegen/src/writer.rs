//! Indentation-aware line writer for generated source.

const INDENT: &str = "    ";

/// Accumulates generated source line by line at the current indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buf: String,
    indentation: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn indent(&mut self) {
        self.indentation += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indentation = self.indentation.saturating_sub(1);
    }

    /// Write `text`, indenting each of its lines. `\r\n` is normalized to `\n`.
    pub(crate) fn line(&mut self, text: &str) {
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                for _ in 0..self.indentation {
                    self.buf.push_str(INDENT);
                }
                self.buf.push_str(line);
            }
            self.buf.push('\n');
        }
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        debug_assert_eq!(self.indentation, 0, "unbalanced indentation");
        self.buf
    }
}
