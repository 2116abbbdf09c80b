//! A pair of length-locked sequences: code points and their per-code-point
//! colors. Used for the prompt and for every line's content.

use crate::color::Color;
use crate::error::TtyError;

/// An ordered sequence of code points plus an ordered sequence of [`Color`]s,
/// kept in length lockstep.
///
/// Every mutator is transactional with respect to that invariant: a failed
/// grow leaves both sequences at their prior length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    codepoints: Vec<char>,
    colors: Vec<Color>,
}

impl TextBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of code points currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.codepoints.len(), self.colors.len());
        self.codepoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.codepoints.clear();
        self.colors.clear();
    }

    /// Reserves capacity for `additional` more code points without
    /// appending anything, so a subsequent `append`/`insert` of that many
    /// characters is guaranteed not to fail on allocation. Lets a caller
    /// that must keep two buffers in lockstep (e.g. the prompt and its
    /// cmdbuf mirror) check both can grow before committing either.
    ///
    /// # Errors
    /// Returns [`TtyError::Memory`] if reserving space fails; `self` is
    /// left unchanged in that case.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TtyError> {
        self.codepoints
            .try_reserve(additional)
            .map_err(|e| TtyError::memory(e.to_string()))?;
        self.colors
            .try_reserve(additional)
            .map_err(|e| TtyError::memory(e.to_string()))?;
        Ok(())
    }

    /// Appends every code point of `text`, all colored `color`.
    ///
    /// # Errors
    /// Returns [`TtyError::Memory`] if growing either sequence fails; on
    /// error the buffer is left exactly as it was before the call.
    pub fn append(&mut self, text: &str, color: Color) -> Result<(), TtyError> {
        self.insert(self.len(), text, color)
    }

    /// Inserts every code point of `text` at `at`, all colored `color`,
    /// shifting existing content right.
    ///
    /// # Errors
    /// Returns [`TtyError::InvalidArgument`] if `at > len()`, or
    /// [`TtyError::Memory`] if growing either sequence fails. On any error
    /// the buffer is left exactly as it was before the call.
    pub fn insert(&mut self, at: usize, text: &str, color: Color) -> Result<(), TtyError> {
        if at > self.len() {
            return Err(TtyError::invalid_argument(format!(
                "insert position {at} exceeds buffer length {}",
                self.len()
            )));
        }
        let n = text.chars().count();
        if n == 0 {
            return Ok(());
        }

        self.codepoints
            .try_reserve(n)
            .map_err(|e| TtyError::memory(e.to_string()))?;
        self.colors
            .try_reserve(n)
            .map_err(|e| TtyError::memory(e.to_string()))?;

        for (offset, ch) in text.chars().enumerate() {
            self.codepoints.insert(at + offset, ch);
            self.colors.insert(at + offset, color);
        }
        debug_assert_eq!(self.codepoints.len(), self.colors.len());
        Ok(())
    }

    /// Overwrites `self` to exactly match `src`'s contents and colors.
    ///
    /// # Errors
    /// Returns [`TtyError::Memory`] if reserving space fails; `self` is
    /// left unchanged in that case.
    pub fn copy_from(&mut self, src: &Self) -> Result<(), TtyError> {
        let mut codepoints = Vec::new();
        let mut colors = Vec::new();
        codepoints
            .try_reserve(src.codepoints.len())
            .map_err(|e| TtyError::memory(e.to_string()))?;
        colors
            .try_reserve(src.colors.len())
            .map_err(|e| TtyError::memory(e.to_string()))?;
        codepoints.extend_from_slice(&src.codepoints);
        colors.extend_from_slice(&src.colors);
        self.codepoints = codepoints;
        self.colors = colors;
        Ok(())
    }

    /// Renders the held code points as a `String`.
    #[must_use]
    pub fn text(&self) -> String {
        self.codepoints.iter().collect()
    }

    #[must_use]
    pub fn codepoints(&self) -> &[char] {
        &self.codepoints
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_then_append_resets_length_and_color() {
        let mut buf = TextBuffer::new();
        buf.append("hello", Color::RED).unwrap();
        buf.clear();
        buf.append("hi", Color::WHITE).unwrap();
        assert_eq!(buf.len(), 2);
        assert!(buf.colors().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn append_keeps_sequences_in_lockstep() {
        let mut buf = TextBuffer::new();
        buf.append("ab", Color::RED).unwrap();
        buf.append("cd", Color::WHITE).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.codepoints().len(), buf.colors().len());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn insert_shifts_existing_content_right() {
        let mut buf = TextBuffer::new();
        buf.append("ac", Color::WHITE).unwrap();
        buf.insert(1, "b", Color::RED).unwrap();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.colors()[1], Color::RED);
    }

    #[test]
    fn insert_past_end_is_invalid_argument() {
        let mut buf = TextBuffer::new();
        buf.append("ab", Color::WHITE).unwrap();
        let before = buf.clone();
        let err = buf.insert(5, "x", Color::RED).unwrap_err();
        assert!(matches!(err, TtyError::InvalidArgument(_)));
        assert_eq!(buf, before);
    }

    #[test]
    fn copy_from_overwrites_exactly() {
        let mut src = TextBuffer::new();
        src.append("xy", Color::RED).unwrap();
        let mut dst = TextBuffer::new();
        dst.append("leftover", Color::WHITE).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);
    }
}
