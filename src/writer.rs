//! Text buffer with cursor bookkeeping and positional annotations.

use serde::Serialize;

const LINE: char = '\n';
const TAB: char = '\t';

/// A style attribute applied to the byte range `[start, end)` of the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation<A> {
    pub attribute: A,
    pub start: usize,
    pub end: usize,
}

/// Append-only text writer.
///
/// Nodes bracket their output with [`save_cursor`](Self::save_cursor) and
/// [`retrieve_cursor`](Self::retrieve_cursor), then annotate the range in
/// between. Annotations keep insertion order and are never merged, so a
/// child's annotation always precedes the one of its enclosing parent.
#[derive(Debug)]
pub struct TextWriter<A> {
    buffer: String,
    saved: Vec<usize>,
    annotations: Vec<Annotation<A>>,
}

impl<A> Default for TextWriter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TextWriter<A> {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            saved: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Current write position, always equal to the buffer length.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn annotations(&self) -> &[Annotation<A>] {
        &self.annotations
    }

    /// Number of saved cursors not yet retrieved.
    pub fn outstanding(&self) -> usize {
        self.saved.len()
    }

    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn line(&mut self) {
        self.buffer.push(LINE);
    }

    /// Break the line unless it is already broken.
    ///
    /// An empty buffer counts as broken, so nothing leads with a blank line.
    pub fn line_if_needed(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with(LINE) {
            self.line();
        }
    }

    pub fn space(&mut self) {
        self.buffer.push(' ');
    }

    /// Insert the alignment marker that a tab stop anchors item content to.
    pub fn tab_if_needed(&mut self) {
        if !self.buffer.ends_with(TAB) {
            self.buffer.push(TAB);
        }
    }

    pub fn save_cursor(&mut self) -> usize {
        let cursor = self.cursor();
        self.saved.push(cursor);
        cursor
    }

    /// Pop the most recently saved cursor.
    ///
    /// Saves and retrievals are paired by the renderer; an unpaired call
    /// yields the current cursor, which annotates an empty range.
    pub fn retrieve_cursor(&mut self) -> usize {
        debug_assert!(!self.saved.is_empty(), "retrieve_cursor without save_cursor");
        self.saved.pop().unwrap_or(self.buffer.len())
    }

    /// Annotate `[start, end)`, clamped to the buffer.
    pub fn set(&mut self, attribute: A, start: usize, end: usize) {
        let end = end.min(self.cursor());
        let start = start.min(end);
        self.annotations.push(Annotation {
            attribute,
            start,
            end,
        });
    }

    /// Annotate from `start` up to the cursor.
    pub fn set_from(&mut self, attribute: A, start: usize) {
        let end = self.cursor();
        self.set(attribute, start, end);
    }

    /// Byte offset of the first line break at or after `from`.
    pub fn find_line(&self, from: usize) -> Option<usize> {
        self.buffer
            .get(from..)
            .and_then(|rest| rest.find(LINE))
            .map(|i| from + i)
    }

    /// Bytes [`finish`](Self::finish) will trim from the front.
    pub fn leading_trim(&self) -> usize {
        usize::from(self.buffer.len() > 1 && self.buffer.starts_with(LINE))
    }

    /// Consume the writer, trimming one boundary line break at each end.
    pub fn finish(self) -> (String, Vec<Annotation<A>>) {
        let mut text = self.buffer;
        let mut annotations = self.annotations;

        if text.ends_with(LINE) {
            text.pop();
        }
        let shift = if text.starts_with(LINE) {
            text.remove(0);
            1
        } else {
            0
        };

        let len = text.len();
        for annotation in &mut annotations {
            annotation.start = annotation.start.saturating_sub(shift).min(len);
            annotation.end = annotation.end.saturating_sub(shift).min(len);
        }

        (text, annotations)
    }
}
