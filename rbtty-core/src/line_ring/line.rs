use crate::text_buffer::TextBuffer;

/// A single scrollback slot: one [`TextBuffer`] plus nothing else — ring
/// membership (`free`/`stdout`/detached) is tracked by [`super::LineRing`],
/// not by the line itself, since the slab is contiguous and owns the lines
/// directly rather than through intrusive list nodes.
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub(crate) text: TextBuffer,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextBuffer {
        &mut self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
